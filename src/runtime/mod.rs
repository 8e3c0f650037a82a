use std::process::ExitCode;

use crate::cli::Cli;
use crate::config::Settings;
use crate::jobs::{ConsoleReporter, Reporter};

mod commands;
mod logging;

pub fn run(cli: Cli) -> ExitCode {
    // Config is optional; a bad file falls back to defaults.
    let (settings, config_warning) = Settings::load_or_default();
    let logs_to_file = logging::init(&settings, cli.verbose);

    let mut reporter = ConsoleReporter::new(logs_to_file);
    if let Some(msg) = config_warning {
        reporter.warning(&msg);
    }
    if let Err(e) = settings.ensure_dirs() {
        reporter.warning(&format!("cannot create working directories: {e}"));
    }

    match commands::dispatch(cli.command, &settings, &mut reporter) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            reporter.failure(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
