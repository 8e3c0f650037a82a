use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::audio::{AudioFormat, QualityPreset};

/// Application settings.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/audio-splitter/config.toml` or
/// `~/.config/audio-splitter/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `AUDIO_SPLITTER_`, e.g. `AUDIO_SPLITTER_OUTPUT_DIR`)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Where split segments go when `--output-dir` is not given.
    pub output_dir: PathBuf,
    /// Fallback lookup directory for relative input paths.
    pub sources_dir: PathBuf,
    pub templates_dir: PathBuf,

    pub default_quality: QualityPreset,
    /// Must be a writable format (wav, mp3 or flac).
    pub default_format: AudioFormat,
    /// Copy tags from source to target on conversion.
    pub preserve_metadata: bool,

    /// `tracing` filter directive, e.g. `info` or `audio_splitter=debug`.
    pub log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    /// Encoder used for MP3 and FLAC output.
    pub ffmpeg_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("data/output"),
            sources_dir: PathBuf::from("data/sources"),
            templates_dir: PathBuf::from("data/templates"),
            default_quality: QualityPreset::High,
            default_format: AudioFormat::Mp3,
            preserve_metadata: true,
            log_level: "info".to_string(),
            log_file: None,
            ffmpeg_path: PathBuf::from("ffmpeg"),
        }
    }
}
