use std::path::Path;

use tracing::info;

use crate::audio::{AudioFormat, CodecGateway, QualityPreset, slice};
use crate::config::Settings;
use crate::error::Result;
use crate::library::{NameResolver, safe_filename};
use crate::segment::{SegmentEntry, plan};
use crate::timecode::format_ms;

use super::report::{BatchResult, Reporter};

/// Output options for a split.
#[derive(Debug, Clone, Copy)]
pub struct SplitOptions {
    pub format: AudioFormat,
    pub quality: QualityPreset,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            format: AudioFormat::Wav,
            quality: QualityPreset::High,
        }
    }
}

/// Cut `input` into one file per entry.
///
/// The source is decoded once. Entries that fail to parse or validate, and
/// segments that fail to encode, are reported and counted as failures while
/// the rest carry on. Failing to decode the source at all is an error.
pub fn split(
    input: &Path,
    output_dir: &Path,
    entries: &[SegmentEntry],
    options: SplitOptions,
    codec: &dyn CodecGateway,
    reporter: &mut dyn Reporter,
) -> Result<BatchResult> {
    let buffer = codec.decode(input)?;
    let duration_ms = buffer.duration_ms();
    info!(
        input = %input.display(),
        duration_ms,
        segments = entries.len(),
        "splitting"
    );

    let plan = plan(entries, duration_ms);
    let mut result = BatchResult::default();

    for rejected in &plan.rejected {
        result.record_failure();
        reporter.failure(&format!(
            "segment {} ({}-{}): {}",
            rejected.index, rejected.entry.start, rejected.entry.end, rejected.error
        ));
    }
    if plan.accepted.is_empty() {
        return Ok(result);
    }

    Settings::ensure_dir(output_dir)?;
    let ext = options.format.extension();
    let mut names = NameResolver::new();

    for planned in &plan.accepted {
        let stem = match safe_filename(&planned.output_stem()) {
            s if s.is_empty() => format!("segment_{}", planned.index),
            s => s,
        };
        let path = names.resolve(output_dir, &stem, ext);
        let piece = slice(&buffer, &planned.segment);

        match codec.encode(&piece, &path, options.format, options.quality) {
            Ok(()) => {
                result.record_success();
                reporter.success(&format!(
                    "{} [{} - {}]",
                    path.display(),
                    format_ms(planned.segment.start_ms()),
                    format_ms(planned.segment.end_ms())
                ));
            }
            Err(e) => {
                result.record_failure();
                reporter.failure(&format!("segment {}: {e}", planned.index));
            }
        }
    }

    Ok(result)
}
