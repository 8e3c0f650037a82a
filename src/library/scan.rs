use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::audio::AudioFormat;

/// How a batch input directory is walked.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    pub recursive: bool,
    pub follow_links: bool,
    pub include_hidden: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            follow_links: true,
            include_hidden: false,
        }
    }
}

/// Recognised input extension (`wav mp3 flac m4a ogg`, any case).
pub fn is_audio_input(path: &Path) -> bool {
    AudioFormat::from_path(path).is_ok()
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Audio files under `dir`, sorted by path.
pub fn scan_inputs(dir: &Path, options: &ScanOptions) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir).follow_links(options.follow_links);

    // Non-recursive = only the root directory.
    if !options.recursive {
        walker = walker.max_depth(1);
    }

    let mut inputs: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| options.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                warn!(%error, "skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file() || e.path().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_audio_input(p))
        .collect();

    inputs.sort();
    debug!(dir = %dir.display(), count = inputs.len(), "inputs found");
    inputs
}
