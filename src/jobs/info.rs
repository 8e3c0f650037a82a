use std::fmt;
use std::path::{Path, PathBuf};

use lofty::prelude::AudioFile;

use crate::audio::AudioFormat;
use crate::error::{CodecError, Error, Result};
use crate::metadata::{self, CanonicalMetadata, MetadataOverrides, WriteOutcome};
use crate::timecode::format_ms;

use super::report::Reporter;

/// What `info` prints about a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub path: PathBuf,
    pub format: AudioFormat,
    pub duration_ms: u64,
    pub sample_rate: Option<u32>,
    pub channels: Option<u8>,
    pub size_bytes: u64,
    pub metadata: CanonicalMetadata,
}

/// Probe stream properties from the container headers and read the tags.
pub fn probe(path: &Path) -> Result<FileInfo> {
    if !path.is_file() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    let format = AudioFormat::from_path(path)?;
    let size_bytes = path.metadata()?.len();

    let tagged = lofty::read_from_path(path).map_err(|e| CodecError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let props = tagged.properties();

    Ok(FileInfo {
        path: path.to_path_buf(),
        format,
        duration_ms: props.duration().as_millis() as u64,
        sample_rate: props.sample_rate(),
        channels: props.channels(),
        size_bytes,
        metadata: metadata::read_file(path)?,
    })
}

impl fmt::Display for FileInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.path.display())?;
        writeln!(f, "  {:<12} {}", "format", self.format)?;
        writeln!(f, "  {:<12} {}", "duration", format_ms(self.duration_ms))?;
        if let Some(rate) = self.sample_rate {
            writeln!(f, "  {:<12} {rate} Hz", "sample rate")?;
        }
        if let Some(ch) = self.channels {
            writeln!(f, "  {:<12} {ch}", "channels")?;
        }
        writeln!(
            f,
            "  {:<12} {:.2} MB",
            "size",
            self.size_bytes as f64 / (1024.0 * 1024.0)
        )?;
        writeln!(f, "metadata:")?;
        write!(f, "{}", self.metadata)
    }
}

/// Read the full record, apply `overrides`, and write it all back.
pub fn update_metadata(
    path: &Path,
    overrides: &MetadataOverrides,
    reporter: &mut dyn Reporter,
) -> Result<CanonicalMetadata> {
    let mut meta = metadata::read_file(path)?;
    overrides.apply(&mut meta);

    match metadata::write_file(path, &meta)? {
        WriteOutcome::Written => reporter.success(&format!("{}: metadata updated", path.display())),
        WriteOutcome::Unsupported => reporter.warning(&format!(
            "{}: format has no tag support, nothing written",
            path.display()
        )),
    }
    Ok(meta)
}
