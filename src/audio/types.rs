//! Formats, quality presets and the in-memory sample buffer.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Container formats the tool recognises.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Wav,
    Mp3,
    Flac,
    M4a,
    Ogg,
}

impl AudioFormat {
    /// Every format accepted as input, in enumeration order.
    pub const INPUTS: [AudioFormat; 5] = [
        AudioFormat::Wav,
        AudioFormat::Mp3,
        AudioFormat::Flac,
        AudioFormat::M4a,
        AudioFormat::Ogg,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
            Self::M4a => "m4a",
            Self::Ogg => "ogg",
        }
    }

    /// Whether files can be written in this format.
    pub fn is_output(self) -> bool {
        matches!(self, Self::Wav | Self::Mp3 | Self::Flac)
    }

    /// Detect the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;
        ext.parse()
    }

    /// Like [`AudioFormat::from_path`], but only for writable formats.
    pub fn output_from_path(path: &Path) -> Result<Self, Error> {
        let format = Self::from_path(path)?;
        if !format.is_output() {
            return Err(Error::UnsupportedFormat(format.to_string()));
        }
        Ok(format)
    }
}

impl FromStr for AudioFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ext = s.trim().trim_start_matches('.').to_ascii_lowercase();
        AudioFormat::INPUTS
            .into_iter()
            .find(|f| f.extension() == ext)
            .ok_or_else(|| Error::UnsupportedFormat(s.to_string()))
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Encoder quality. MP3 maps the first three to bitrates and the VBR
/// presets to LAME quality levels; FLAC maps to compression levels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityPreset {
    Low,
    Medium,
    #[default]
    High,
    #[serde(alias = "vbr-medium")]
    VbrMedium,
    #[serde(alias = "vbr-high")]
    VbrHigh,
}

impl QualityPreset {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VbrMedium => "vbr_medium",
            Self::VbrHigh => "vbr_high",
        }
    }

    /// Encoder arguments for `format`. WAV takes none.
    pub fn encoder_args(self, format: AudioFormat) -> Vec<&'static str> {
        match format {
            AudioFormat::Mp3 => {
                let rate = match self {
                    Self::Low => ["-b:a", "128k"],
                    Self::Medium => ["-b:a", "192k"],
                    Self::High => ["-b:a", "320k"],
                    Self::VbrMedium => ["-q:a", "2"],
                    Self::VbrHigh => ["-q:a", "0"],
                };
                let mut args = vec!["-codec:a", "libmp3lame"];
                args.extend(rate);
                args
            }
            AudioFormat::Flac => {
                // VBR presets have no FLAC meaning; they get the highest level.
                let level = match self {
                    Self::Low => "0",
                    Self::Medium => "5",
                    Self::High | Self::VbrMedium | Self::VbrHigh => "8",
                };
                vec!["-codec:a", "flac", "-compression_level", level, "-sample_fmt", "s16"]
            }
            _ => Vec::new(),
        }
    }
}

impl FromStr for QualityPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "vbr_medium" => Ok(Self::VbrMedium),
            "vbr_high" => Ok(Self::VbrHigh),
            _ => Err(Error::UnsupportedFormat(format!("quality preset {s}"))),
        }
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only facts about a decoded source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioStreamInfo {
    pub duration_ms: u64,
    pub sample_rate: u32,
    pub channel_count: u16,
    pub format: AudioFormat,
}

/// Interleaved `f32` samples plus the layout needed to interpret them.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl AudioBuffer {
    /// Build a buffer; a trailing partial frame is dropped.
    pub fn new(mut samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        let channels = channels.max(1);
        let whole = samples.len() - samples.len() % usize::from(channels);
        samples.truncate(whole);
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Number of sample frames (one sample per channel).
    pub fn frames(&self) -> u64 {
        (self.samples.len() / usize::from(self.channels)) as u64
    }

    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        (u128::from(self.frames()) * 1000 / u128::from(self.sample_rate)) as u64
    }

    /// Samples of frames `start..end`, clamped to the buffer.
    pub fn frame_range(&self, start: u64, end: u64) -> &[f32] {
        let frames = self.frames();
        let start = start.min(frames) as usize;
        let end = end.clamp(start as u64, frames) as usize;
        let ch = usize::from(self.channels);
        &self.samples[start * ch..end * ch]
    }

    /// Same layout, different samples.
    pub fn with_samples(&self, samples: Vec<f32>) -> Self {
        Self::new(samples, self.sample_rate, self.channels)
    }

    pub fn info(&self, format: AudioFormat) -> AudioStreamInfo {
        AudioStreamInfo {
            duration_ms: self.duration_ms(),
            sample_rate: self.sample_rate,
            channel_count: self.channels,
            format,
        }
    }
}
