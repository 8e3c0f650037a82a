use std::process::ExitCode;

use clap::Parser;

mod audio;
mod cli;
mod config;
mod error;
mod jobs;
mod library;
mod metadata;
mod runtime;
mod segment;
mod timecode;

fn main() -> ExitCode {
    runtime::run(cli::Cli::parse())
}
