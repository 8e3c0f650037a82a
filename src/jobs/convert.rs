use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::audio::{AudioFormat, CodecGateway, QualityPreset};
use crate::error::{Error, Result};
use crate::library::{NameResolver, ScanOptions, safe_filename, scan_inputs};
use crate::metadata::{TagScheme, WriteOutcome};

use super::report::{BatchResult, Reporter};

/// One file to convert. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    input_path: PathBuf,
    output_path: PathBuf,
    target_format: AudioFormat,
    quality_preset: QualityPreset,
    preserve_metadata: bool,
}

impl ConversionJob {
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        target_format: AudioFormat,
        quality_preset: QualityPreset,
        preserve_metadata: bool,
    ) -> Result<Self> {
        if !target_format.is_output() {
            return Err(Error::UnsupportedFormat(target_format.to_string()));
        }
        Ok(Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            target_format,
            quality_preset,
            preserve_metadata,
        })
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn target_format(&self) -> AudioFormat {
        self.target_format
    }
}

/// Decode, re-encode, then carry tags across when asked to.
///
/// A source whose tags cannot be read is converted without them (warning).
/// A target without tag support gets a warning. A tag write rejected by a
/// tag-capable target fails the job.
pub fn convert_one(
    job: &ConversionJob,
    codec: &dyn CodecGateway,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    let input = job.input_path();
    let output = job.output_path();
    if !input.is_file() {
        return Err(Error::FileNotFound(input.to_path_buf()));
    }
    let source_format = AudioFormat::from_path(input)?;

    let buffer = codec.decode(input)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    codec.encode(&buffer, output, job.target_format, job.quality_preset)?;

    if !job.preserve_metadata {
        return Ok(());
    }

    let meta = match TagScheme::for_format(source_format).read_file(input) {
        Ok(meta) => meta,
        Err(e) => {
            reporter.warning(&format!("{}: metadata not copied: {e}", input.display()));
            return Ok(());
        }
    };
    if meta.is_empty() {
        debug!(input = %input.display(), "source has no metadata to copy");
        return Ok(());
    }

    match TagScheme::for_format(job.target_format).write_file(output, &meta)? {
        WriteOutcome::Written => {}
        WriteOutcome::Unsupported => reporter.warning(&format!(
            "{}: {} has no tag support, metadata not copied",
            output.display(),
            job.target_format
        )),
    }
    Ok(())
}

/// Run every job in order. A failing job is reported and counted; it never
/// stops the ones after it.
pub fn run(
    jobs: &[ConversionJob],
    codec: &dyn CodecGateway,
    reporter: &mut dyn Reporter,
) -> BatchResult {
    let mut result = BatchResult::default();

    for job in jobs {
        match convert_one(job, codec, reporter) {
            Ok(()) => {
                result.record_success();
                reporter.success(&format!(
                    "{} -> {}",
                    job.input_path.display(),
                    job.output_path.display()
                ));
            }
            Err(e) => {
                result.record_failure();
                reporter.failure(&format!("{}: {e}", job.input_path.display()));
            }
        }
    }

    info!(
        successful = result.successful,
        failed = result.failed,
        "batch finished"
    );
    result
}

/// Target path for a single conversion: `output` as given, or a free
/// `<stem>.<ext>` inside it when `output` is an existing directory.
pub fn single_output_path(input: &Path, output: &Path, format: AudioFormat) -> PathBuf {
    if output.is_dir() {
        crate::library::resolve(output, &output_stem(input), format.extension())
    } else {
        output.to_path_buf()
    }
}

/// One job per recognised file in `input_dir`, each writing
/// `<output_dir>/<stem>.<ext>`. Names are unique against the filesystem and
/// against each other.
pub fn plan_batch(
    input_dir: &Path,
    output_dir: &Path,
    format: AudioFormat,
    quality: QualityPreset,
    preserve_metadata: bool,
    scan: &ScanOptions,
) -> Result<Vec<ConversionJob>> {
    if !input_dir.is_dir() {
        return Err(Error::FileNotFound(input_dir.to_path_buf()));
    }

    let mut names = NameResolver::new();
    scan_inputs(input_dir, scan)
        .into_iter()
        .map(|input| {
            let output = names.resolve(output_dir, &output_stem(&input), format.extension());
            ConversionJob::new(input, output, format, quality, preserve_metadata)
        })
        .collect()
}

fn output_stem(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| safe_filename(&s.to_string_lossy()))
        .unwrap_or_default();
    if stem.is_empty() {
        "output".to_string()
    } else {
        stem
    }
}
