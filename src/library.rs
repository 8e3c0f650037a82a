//! Input discovery and output naming.

mod naming;
mod scan;

pub use naming::{NameResolver, resolve, safe_filename};
pub use scan::{ScanOptions, is_audio_input, scan_inputs};
