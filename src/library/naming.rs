use std::collections::HashSet;
use std::path::{Path, PathBuf};

const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Make `name` usable as a file stem on common filesystems. Reserved and
/// control characters become `_`; trailing dots and spaces are trimmed.
/// Returns an empty string when nothing usable is left.
pub fn safe_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if RESERVED_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    cleaned.trim().trim_end_matches(['.', ' ']).to_string()
}

fn candidate(dir: &Path, base: &str, ext: &str, n: u32) -> PathBuf {
    let file = if n == 0 {
        format!("{base}.{ext}")
    } else {
        format!("{base}_{n}.{ext}")
    };
    dir.join(file)
}

/// First free path among `base.ext`, `base_1.ext`, `base_2.ext`, ...
pub fn resolve(dir: &Path, base: &str, ext: &str) -> PathBuf {
    NameResolver::default().probe(dir, base, ext)
}

/// Collision resolution that also remembers every path it has handed out,
/// so a batch never assigns the same output twice before anything is
/// written.
#[derive(Debug, Default)]
pub struct NameResolver {
    reserved: HashSet<PathBuf>,
}

impl NameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn probe(&self, dir: &Path, base: &str, ext: &str) -> PathBuf {
        (0u32..)
            .map(|n| candidate(dir, base, ext, n))
            .find(|p| !p.exists() && !self.reserved.contains(p))
            .unwrap_or_else(|| candidate(dir, base, ext, u32::MAX))
    }

    /// Resolve and reserve.
    pub fn resolve(&mut self, dir: &Path, base: &str, ext: &str) -> PathBuf {
        let path = self.probe(dir, base, ext);
        self.reserved.insert(path.clone());
        path
    }
}
