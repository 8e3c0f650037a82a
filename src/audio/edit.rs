//! Block edits: copy a span of a track and either splice it in or paint it
//! over another position.

use tracing::debug;

use crate::error::{Error, Result};
use crate::segment::Segment;

use super::slice::{ms_to_frame, slice};
use super::types::AudioBuffer;

/// A validated `[start, end)` block and the position it goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEdit {
    block: Segment,
    at_ms: u64,
}

impl BlockEdit {
    /// Checks `0 <= start < end <= duration` and `0 <= at <= duration`.
    pub fn new(start_ms: u64, end_ms: u64, at_ms: u64, duration_ms: u64) -> Result<Self> {
        let block = Segment::new(start_ms, end_ms, None, duration_ms)?;
        if at_ms > duration_ms {
            return Err(Error::InvalidRange(format!(
                "position {at_ms} ms is past the end of the track ({duration_ms} ms)"
            )));
        }
        Ok(Self { block, at_ms })
    }

    pub fn block(&self) -> &Segment {
        &self.block
    }

    pub fn at_ms(&self) -> u64 {
        self.at_ms
    }
}

/// Splice a copy of the block in at `at`; the track grows by its length.
pub fn insert_block(audio: &AudioBuffer, edit: &BlockEdit) -> AudioBuffer {
    let block = slice(audio, &edit.block);
    let at = ms_to_frame(edit.at_ms, audio.sample_rate());

    let mut out = Vec::with_capacity(audio.samples().len() + block.samples().len());
    out.extend_from_slice(audio.frame_range(0, at));
    out.extend_from_slice(block.samples());
    out.extend_from_slice(audio.frame_range(at, audio.frames()));

    debug!(at_ms = edit.at_ms, frames = block.frames(), "block inserted");
    audio.with_samples(out)
}

/// Write the block over the audio starting at `at`.
///
/// The result is `audio[..at] + block + audio[at + len..]`; a block that runs
/// past the end extends the track.
pub fn replace_block(audio: &AudioBuffer, edit: &BlockEdit) -> AudioBuffer {
    let block = slice(audio, &edit.block);
    let at = ms_to_frame(edit.at_ms, audio.sample_rate());
    let resume = at.saturating_add(block.frames());

    let mut out = Vec::with_capacity(audio.samples().len().max(block.samples().len()));
    out.extend_from_slice(audio.frame_range(0, at));
    out.extend_from_slice(block.samples());
    out.extend_from_slice(audio.frame_range(resume, audio.frames()));

    debug!(at_ms = edit.at_ms, frames = block.frames(), "block replaced");
    audio.with_samples(out)
}
