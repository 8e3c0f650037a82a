use crate::segment::Segment;

use super::types::AudioBuffer;

/// Frame index of a millisecond offset: `floor(ms * sample_rate / 1000)`.
pub fn ms_to_frame(ms: u64, sample_rate: u32) -> u64 {
    (u128::from(ms) * u128::from(sample_rate) / 1000) as u64
}

/// Copy out the frames covered by `segment`. Layout and sample rate are
/// kept; nothing is resampled.
pub fn slice(buffer: &AudioBuffer, segment: &Segment) -> AudioBuffer {
    slice_ms(buffer, segment.start_ms(), segment.end_ms())
}

pub(crate) fn slice_ms(buffer: &AudioBuffer, start_ms: u64, end_ms: u64) -> AudioBuffer {
    let rate = buffer.sample_rate();
    let range = buffer.frame_range(ms_to_frame(start_ms, rate), ms_to_frame(end_ms, rate));
    buffer.with_samples(range.to_vec())
}
