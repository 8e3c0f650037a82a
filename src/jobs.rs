//! Orchestrators behind each command.
//!
//! Per-item problems (one segment, one batch file) are reported through a
//! [`Reporter`] and counted in a [`BatchResult`]; only problems with the
//! whole request come back as `Err`.

mod convert;
mod edit;
mod info;
mod report;
mod split;

pub use convert::{ConversionJob, convert_one, plan_batch, run, single_output_path};
pub use edit::{BlockOp, BlockTimes, edit_block};
pub use info::{FileInfo, probe, update_metadata};
pub use report::{BatchResult, ConsoleReporter, Reporter};
pub use split::{SplitOptions, split};

#[cfg(test)]
mod tests;
