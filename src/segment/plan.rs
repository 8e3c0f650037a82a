use tracing::debug;

use crate::error::Error;
use crate::timecode::parse_as_ms_or_seconds;

use super::model::{Segment, SegmentEntry};

/// A segment that passed validation, with its 1-based position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedSegment {
    pub index: usize,
    pub segment: Segment,
}

impl PlannedSegment {
    /// Output file stem: the user's name, or `segment_<index>`.
    pub fn output_stem(&self) -> String {
        match self.segment.name() {
            Some(name) => name.to_string(),
            None => format!("segment_{}", self.index),
        }
    }
}

/// An entry that failed to parse or validate.
#[derive(Debug)]
pub struct RejectedEntry {
    pub index: usize,
    pub entry: SegmentEntry,
    pub error: Error,
}

/// Result of planning a batch of entries. Rejections never abort siblings;
/// the caller decides what a rejection means for the whole run.
#[derive(Debug, Default)]
pub struct SegmentPlan {
    pub accepted: Vec<PlannedSegment>,
    pub rejected: Vec<RejectedEntry>,
}

impl SegmentPlan {
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Parse and validate one entry against the track duration.
pub fn plan_entry(entry: &SegmentEntry, duration_ms: u64) -> Result<Segment, Error> {
    let start_ms = parse_as_ms_or_seconds(&entry.start)?;
    let end_ms = parse_as_ms_or_seconds(&entry.end)?;
    Ok(Segment::new(start_ms, end_ms, entry.name.clone(), duration_ms)?)
}

/// Plan every entry in order. Overlapping or out-of-order segments are
/// allowed; only each entry's own bounds are checked.
pub fn plan(entries: &[SegmentEntry], duration_ms: u64) -> SegmentPlan {
    let mut out = SegmentPlan::default();

    for (i, entry) in entries.iter().enumerate() {
        let index = i + 1;
        match plan_entry(entry, duration_ms) {
            Ok(segment) => {
                debug!(
                    index,
                    start_ms = segment.start_ms(),
                    end_ms = segment.end_ms(),
                    "segment accepted"
                );
                out.accepted.push(PlannedSegment { index, segment });
            }
            Err(error) => {
                debug!(index, %error, "segment rejected");
                out.rejected.push(RejectedEntry {
                    index,
                    entry: entry.clone(),
                    error,
                });
            }
        }
    }

    out
}
