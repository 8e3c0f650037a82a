use std::path::Path;

use tracing::debug;

use crate::audio::NativeCodec;
use crate::cli::{BlockArgs, Command};
use crate::config::{Settings, resolve_config_path};
use crate::error::{Error, Result};
use crate::jobs::{
    self, BlockOp, BlockTimes, ConversionJob, Reporter, SplitOptions, edit_block, plan_batch,
    single_output_path,
};
use crate::library::ScanOptions;
use crate::metadata::{self, MetadataOverrides};
use crate::timecode::format_ms;

/// Run one command. `Ok(false)` means it ran but some item failed.
pub fn dispatch(command: Command, settings: &Settings, reporter: &mut dyn Reporter) -> Result<bool> {
    let codec = NativeCodec::new(&settings.ffmpeg_path);

    match command {
        Command::Split {
            input,
            output_dir,
            segments,
            format,
            quality,
        } => {
            let input = settings.locate_input(&input);
            let output_dir = output_dir.unwrap_or_else(|| settings.output_dir.clone());
            let options = SplitOptions {
                format,
                quality: quality.unwrap_or(settings.default_quality),
            };

            let result = jobs::split(&input, &output_dir, &segments, options, &codec, reporter)?;
            println!(
                "{} of {} segments written to {}",
                result.successful,
                result.total(),
                output_dir.display()
            );
            Ok(result.all_succeeded())
        }

        Command::Convert {
            input,
            output,
            format,
            quality,
            batch,
            recursive,
            no_metadata,
        } => {
            let input = settings.locate_input(&input);
            let format = format.unwrap_or(settings.default_format);
            let quality = quality.unwrap_or(settings.default_quality);
            let preserve = settings.preserve_metadata && !no_metadata;

            let planned = if batch {
                let scan = ScanOptions {
                    recursive,
                    ..ScanOptions::default()
                };
                plan_batch(&input, &output, format, quality, preserve, &scan)?
            } else {
                let output = single_output_path(&input, &output, format);
                vec![ConversionJob::new(input.clone(), output, format, quality, preserve)?]
            };

            if planned.is_empty() {
                reporter.warning(&format!("no audio files found in {}", input.display()));
                return Ok(true);
            }
            debug!(count = planned.len(), "conversion jobs planned");

            let result = jobs::run(&planned, &codec, reporter);
            if batch {
                println!(
                    "{} of {} files converted",
                    result.successful,
                    result.total()
                );
            }
            Ok(result.all_succeeded())
        }

        Command::Metadata {
            file,
            title,
            artist,
            album,
            genre,
            year,
        } => {
            let file = settings.locate_input(&file);
            let overrides = MetadataOverrides {
                title,
                artist,
                album,
                genre,
                year,
            };

            if overrides.is_empty() {
                println!("{}", file.display());
                print!("{}", metadata::read_file(&file)?);
            } else {
                let updated = jobs::update_metadata(&file, &overrides, reporter)?;
                print!("{updated}");
            }
            Ok(true)
        }

        Command::Info { file } => {
            let info = jobs::probe(&settings.locate_input(&file))?;
            print!("{info}");
            Ok(true)
        }

        Command::InsertBlock {
            input,
            output,
            block,
        } => run_block_edit(BlockOp::Insert, &input, &output, &block, settings, &codec, reporter),

        Command::ReplaceBlock {
            input,
            output,
            block,
        } => run_block_edit(BlockOp::Replace, &input, &output, &block, settings, &codec, reporter),

        Command::Config => {
            match resolve_config_path() {
                Some(path) => println!("# config file: {}", path.display()),
                None => println!("# no config file location"),
            }
            let rendered = settings
                .to_toml()
                .map_err(|e| Error::Config(::config::ConfigError::Message(e.to_string())))?;
            print!("{rendered}");
            Ok(true)
        }
    }
}

fn run_block_edit(
    op: BlockOp,
    input: &Path,
    output: &Path,
    block: &BlockArgs,
    settings: &Settings,
    codec: &NativeCodec,
    reporter: &mut dyn Reporter,
) -> Result<bool> {
    let input = settings.locate_input(input);
    let times = BlockTimes {
        start: &block.start,
        end: &block.end,
        at: &block.at,
    };
    let quality = block.quality.unwrap_or(settings.default_quality);

    let written = edit_block(&input, output, op, &times, quality, codec)?;
    reporter.success(&format!(
        "{} -> {} ({}, {} Hz, {} ch)",
        input.display(),
        output.display(),
        format_ms(written.duration_ms),
        written.sample_rate,
        written.channel_count
    ));
    Ok(true)
}
