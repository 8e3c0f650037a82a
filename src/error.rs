//! Error taxonomy shared by every module.
//!
//! Leaf errors (`TimeFormatError`, `SegmentRangeError`, `CodecError`,
//! `MetadataError`) are produced close to where things go wrong and are
//! folded into the crate-wide [`Error`] at the orchestration boundary.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// A time expression that could not be turned into milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeFormatError {
    #[error("empty time expression")]
    Empty,

    #[error("`{input}`: expected SS, MM:SS or HH:MM:SS")]
    TokenCount { input: String },

    #[error("`{input}`: `{token}` is not a number")]
    NotNumeric { input: String, token: String },

    #[error("`{input}`: time cannot be negative")]
    Negative { input: String },

    #[error("`{input}`: time is too large")]
    Overflow { input: String },
}

/// A segment whose bounds do not satisfy `0 <= start < end <= duration`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentRangeError {
    #[error("segment start {start_ms} ms is not before its end {end_ms} ms")]
    EmptyOrReversed { start_ms: u64, end_ms: u64 },

    #[error("segment end {end_ms} ms is past the end of the track ({duration_ms} ms)")]
    PastEnd { end_ms: u64, duration_ms: u64 },
}

/// Failure surfaced by the codec gateway.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("cannot decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("cannot encode {path}: {reason}")]
    Encode { path: PathBuf, reason: String },

    #[error("{format} output needs ffmpeg ({program}): {reason}")]
    EncoderUnavailable {
        format: &'static str,
        program: PathBuf,
        reason: String,
    },
}

/// Failure reading or writing a native tag container.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("cannot read tags from {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("cannot write tags to {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("artwork rejected: {0}")]
    Artwork(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    TimeFormat(#[from] TimeFormatError),

    #[error(transparent)]
    SegmentRange(#[from] SegmentRangeError),

    #[error("unsupported format `{0}`")]
    UnsupportedFormat(String),

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    MetadataWrite(#[from] MetadataError),

    #[error("invalid segment `{0}`: expected start-end or start-end:name")]
    InvalidSegmentSpec(String),

    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}
