use std::fs;
use std::path::Path;

use tracing::info;

use crate::audio::{
    AudioFormat, AudioStreamInfo, BlockEdit, CodecGateway, QualityPreset, insert_block,
    replace_block,
};
use crate::error::Result;
use crate::timecode::parse_as_seconds;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOp {
    /// Splice the block in; the track gets longer.
    Insert,
    /// Paint the block over the audio at the target position.
    Replace,
}

/// Times as typed by the user. Bare numbers are seconds.
#[derive(Debug, Clone)]
pub struct BlockTimes<'a> {
    pub start: &'a str,
    pub end: &'a str,
    pub at: &'a str,
}

/// Copy `[start, end)` of `input` to `at` and write the result to `output`,
/// whose extension picks the format.
pub fn edit_block(
    input: &Path,
    output: &Path,
    op: BlockOp,
    times: &BlockTimes<'_>,
    quality: QualityPreset,
    codec: &dyn CodecGateway,
) -> Result<AudioStreamInfo> {
    let format = AudioFormat::output_from_path(output)?;
    let start_ms = parse_as_seconds(times.start)?;
    let end_ms = parse_as_seconds(times.end)?;
    let at_ms = parse_as_seconds(times.at)?;

    let audio = codec.decode(input)?;
    let edit = BlockEdit::new(start_ms, end_ms, at_ms, audio.duration_ms())?;

    let edited = match op {
        BlockOp::Insert => insert_block(&audio, &edit),
        BlockOp::Replace => replace_block(&audio, &edit),
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    codec.encode(&edited, output, format, quality)?;

    let result = edited.info(format);
    info!(
        ?op,
        start_ms,
        end_ms,
        at_ms,
        before_ms = audio.duration_ms(),
        after_ms = result.duration_ms,
        "block edit written"
    );
    Ok(result)
}
