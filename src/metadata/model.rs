use std::fmt;

use crate::error::MetadataError;

/// Largest cover image that will be embedded.
pub const MAX_ARTWORK_BYTES: usize = 10 * 1024 * 1024;

/// Embedded cover image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artwork {
    pub data: Vec<u8>,
    pub mime: String,
    pub description: String,
}

impl Artwork {
    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.data.is_empty() {
            return Err(MetadataError::Artwork("image is empty".to_string()));
        }
        if self.data.len() > MAX_ARTWORK_BYTES {
            return Err(MetadataError::Artwork(format!(
                "image is {} bytes, limit is {MAX_ARTWORK_BYTES}",
                self.data.len()
            )));
        }
        Ok(())
    }
}

/// Format-neutral tag record. `None` means the field is not present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub albumartist: Option<String>,
    pub date: Option<String>,
    pub genre: Option<String>,
    pub track: Option<String>,
    pub track_total: Option<String>,
    pub disc: Option<String>,
    pub disc_total: Option<String>,
    pub composer: Option<String>,
    pub comment: Option<String>,
    pub artwork: Option<Artwork>,
}

impl CanonicalMetadata {
    pub fn is_empty(&self) -> bool {
        self.text_fields().all(|(_, v)| v.is_none()) && self.artwork.is_none()
    }

    /// Text fields with their display labels, in a stable order.
    pub fn text_fields(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> {
        [
            ("title", &self.title),
            ("artist", &self.artist),
            ("album", &self.album),
            ("albumartist", &self.albumartist),
            ("date", &self.date),
            ("genre", &self.genre),
            ("track", &self.track),
            ("track_total", &self.track_total),
            ("disc", &self.disc),
            ("disc_total", &self.disc_total),
            ("composer", &self.composer),
            ("comment", &self.comment),
        ]
        .into_iter()
        .map(|(k, v)| (k, v.as_deref()))
    }
}

impl fmt::Display for CanonicalMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "  (no metadata)");
        }
        for (label, value) in self.text_fields() {
            if let Some(v) = value {
                writeln!(f, "  {label:<12} {v}")?;
            }
        }
        if let Some(art) = &self.artwork {
            writeln!(f, "  {:<12} {} ({} bytes)", "artwork", art.mime, art.data.len())?;
        }
        Ok(())
    }
}

/// Field overrides from the `metadata` command. Only supplied fields change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataOverrides {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub year: Option<String>,
}

impl MetadataOverrides {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist.is_none()
            && self.album.is_none()
            && self.genre.is_none()
            && self.year.is_none()
    }

    pub fn apply(&self, meta: &mut CanonicalMetadata) {
        let set = |slot: &mut Option<String>, value: &Option<String>| {
            if let Some(v) = value {
                *slot = non_blank(v);
            }
        };
        set(&mut meta.title, &self.title);
        set(&mut meta.artist, &self.artist);
        set(&mut meta.album, &self.album);
        set(&mut meta.genre, &self.genre);
        set(&mut meta.date, &self.year);
    }
}

/// Trimmed value, or `None` when blank. Native readers pass every value
/// through this so an empty frame reads as an absent field.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let v = value.trim();
    (!v.is_empty()).then(|| v.to_string())
}

/// Split an `n/total` pair as stored in ID3 `TRCK`/`TPOS`.
pub(crate) fn split_pair(value: &str) -> (Option<String>, Option<String>) {
    match value.split_once('/') {
        Some((n, total)) => (non_blank(n), non_blank(total)),
        None => (non_blank(value), None),
    }
}

/// Join a number and its total back into `n/total`. A total without a
/// number has nowhere to go.
pub(crate) fn join_pair(n: Option<&str>, total: Option<&str>) -> Option<String> {
    match (n, total) {
        (Some(n), Some(t)) => Some(format!("{n}/{t}")),
        (Some(n), None) => Some(n.to_string()),
        (None, _) => None,
    }
}
