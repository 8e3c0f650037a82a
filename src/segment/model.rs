use std::str::FromStr;

use crate::error::{Error, SegmentRangeError};

/// A validated interval of a track, `0 <= start_ms < end_ms <= duration`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    start_ms: u64,
    end_ms: u64,
    name: Option<String>,
}

impl Segment {
    /// Build a segment, checking its bounds against the track duration.
    pub fn new(
        start_ms: u64,
        end_ms: u64,
        name: Option<String>,
        duration_ms: u64,
    ) -> Result<Self, SegmentRangeError> {
        if start_ms >= end_ms {
            return Err(SegmentRangeError::EmptyOrReversed { start_ms, end_ms });
        }
        if end_ms > duration_ms {
            return Err(SegmentRangeError::PastEnd {
                end_ms,
                duration_ms,
            });
        }

        let name = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        Ok(Self {
            start_ms,
            end_ms,
            name,
        })
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> u64 {
        self.end_ms
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}

/// One user-supplied `(start, end, name)` triple, times still unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentEntry {
    pub start: String,
    pub end: String,
    pub name: Option<String>,
}

impl SegmentEntry {
    pub fn new(start: impl Into<String>, end: impl Into<String>, name: Option<&str>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            name: name.map(str::to_string),
        }
    }
}

/// Parses `start-end` or `start-end:name`.
///
/// Times may contain colons themselves (`1:30-2:00:chorus`), so the name is
/// whatever follows the last colon only when that tail is not a number.
/// `0-30:01` therefore reads as 0 to 30:01, never as a segment named `01`.
impl FromStr for SegmentEntry {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidSegmentSpec(s.to_string());

        let (start, rest) = s.trim().split_once('-').ok_or_else(invalid)?;

        let is_time_component = |t: &str| t.chars().all(|c| c.is_ascii_digit() || c == '.');
        let (end, name) = match rest.rsplit_once(':') {
            Some((end, tail)) if tail.trim().is_empty() => (end, None),
            Some((end, tail)) if !is_time_component(tail.trim()) => (end, Some(tail.trim())),
            _ => (rest, None),
        };

        let (start, end) = (start.trim(), end.trim());
        if start.is_empty() || end.is_empty() {
            return Err(invalid());
        }

        Ok(Self::new(start, end, name))
    }
}
