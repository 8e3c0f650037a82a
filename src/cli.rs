use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::audio::{AudioFormat, QualityPreset};
use crate::segment::SegmentEntry;

#[derive(Parser, Debug)]
#[command(name = "audio-splitter")]
#[command(about = "Split audio files into segments and convert between formats")]
#[command(version)]
pub struct Cli {
    /// Log at debug level (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Cut one file into named segments
    Split {
        input: PathBuf,

        /// Defaults to `output_dir` from the config
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// `start-end` or `start-end:name`; times as MM:SS, HH:MM:SS, seconds or milliseconds
        #[arg(short, long, required = true, num_args = 1..)]
        segments: Vec<SegmentEntry>,

        #[arg(short, long, default_value_t = AudioFormat::Wav)]
        format: AudioFormat,

        #[arg(short, long)]
        quality: Option<QualityPreset>,
    },

    /// Convert a file, or a whole directory with --batch
    Convert {
        input: PathBuf,

        /// Output file, or output directory with --batch
        #[arg(short, long)]
        output: PathBuf,

        /// wav, mp3 or flac; defaults to `default_format` from the config
        #[arg(short, long)]
        format: Option<AudioFormat>,

        /// low, medium, high, vbr-medium or vbr-high
        #[arg(short, long)]
        quality: Option<QualityPreset>,

        #[arg(short, long)]
        batch: bool,

        /// Descend into subdirectories (with --batch)
        #[arg(short, long)]
        recursive: bool,

        /// Do not copy tags to the converted files
        #[arg(long)]
        no_metadata: bool,
    },

    /// Show tags, or overwrite the given fields
    Metadata {
        file: PathBuf,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        artist: Option<String>,

        #[arg(long)]
        album: Option<String>,

        #[arg(long)]
        genre: Option<String>,

        #[arg(long)]
        year: Option<String>,
    },

    /// Show stream properties and tags
    Info { file: PathBuf },

    /// Copy [start, end) and splice it in at --at
    InsertBlock {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        block: BlockArgs,
    },

    /// Copy [start, end) over the audio starting at --at
    ReplaceBlock {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        block: BlockArgs,
    },

    /// Print the effective configuration as TOML
    Config,
}

/// Times are seconds unless written as MM:SS or HH:MM:SS.
#[derive(clap::Args, Debug)]
pub struct BlockArgs {
    #[arg(long)]
    pub start: String,

    #[arg(long)]
    pub end: String,

    #[arg(long)]
    pub at: String,

    #[arg(short, long)]
    pub quality: Option<QualityPreset>,
}
