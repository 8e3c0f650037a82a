use std::path::Path;

use id3::{Tag, Version};
use lofty::config::WriteOptions;
use lofty::mp4::Ilst;
use lofty::ogg::VorbisComments;
use lofty::prelude::{TagExt, TaggedFileExt};
use lofty::tag::TagType;
use tracing::{debug, warn};

use crate::audio::AudioFormat;
use crate::error::{Error, MetadataError};

use super::atom::AtomMapper;
use super::id3v2::Id3Mapper;
use super::mapper::Mapper;
use super::model::CanonicalMetadata;
use super::vorbis::VorbisMapper;

/// Native tag family of a container, chosen once from its format.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TagScheme {
    Id3,
    Vorbis,
    Atom,
    /// The container has no native tags (WAV).
    Unsupported,
}

/// What a file write actually did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// No-op on a container without tag support. Not a failure.
    Unsupported,
}

impl TagScheme {
    pub fn for_format(format: AudioFormat) -> Self {
        match format {
            AudioFormat::Mp3 => Self::Id3,
            AudioFormat::Flac | AudioFormat::Ogg => Self::Vorbis,
            AudioFormat::M4a => Self::Atom,
            AudioFormat::Wav => Self::Unsupported,
        }
    }

    pub fn read_file(self, path: &Path) -> Result<CanonicalMetadata, MetadataError> {
        let meta = match self {
            Self::Id3 => Id3Mapper::read(&load_id3(path)?),
            Self::Vorbis => VorbisMapper::read(&load_lofty::<VorbisComments>(
                path,
                TagType::VorbisComments,
            )?),
            Self::Atom => AtomMapper::read(&load_lofty::<Ilst>(path, TagType::Mp4Ilst)?),
            Self::Unsupported => CanonicalMetadata::default(),
        };
        debug!(path = %path.display(), scheme = ?self, empty = meta.is_empty(), "tags read");
        Ok(meta)
    }

    /// Full-replace write of the managed fields; unmanaged fields already in
    /// the file are kept.
    pub fn write_file(
        self,
        path: &Path,
        meta: &CanonicalMetadata,
    ) -> Result<WriteOutcome, MetadataError> {
        let write_err = |reason: String| MetadataError::Write {
            path: path.to_path_buf(),
            reason,
        };

        match self {
            Self::Id3 => {
                let mut tag = load_id3(path)?;
                Id3Mapper::write(&mut tag, meta)?;
                tag.write_to_path(path, Version::Id3v24)
                    .map_err(|e| write_err(e.to_string()))?;
            }
            Self::Vorbis => {
                let mut tag = load_lofty::<VorbisComments>(path, TagType::VorbisComments)?;
                VorbisMapper::write(&mut tag, meta)?;
                tag.save_to_path(path, WriteOptions::default())
                    .map_err(|e| write_err(e.to_string()))?;
            }
            Self::Atom => {
                let mut tag = load_lofty::<Ilst>(path, TagType::Mp4Ilst)?;
                AtomMapper::write(&mut tag, meta)?;
                tag.save_to_path(path, WriteOptions::default())
                    .map_err(|e| write_err(e.to_string()))?;
            }
            Self::Unsupported => {
                warn!(path = %path.display(), "container has no tag support; metadata not written");
                return Ok(WriteOutcome::Unsupported);
            }
        }

        debug!(path = %path.display(), scheme = ?self, "tags written");
        Ok(WriteOutcome::Written)
    }
}

/// Read a file's metadata, picking the scheme from its extension.
pub fn read_file(path: &Path) -> Result<CanonicalMetadata, Error> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    let format = AudioFormat::from_path(path)?;
    Ok(TagScheme::for_format(format).read_file(path)?)
}

/// Write a file's metadata, picking the scheme from its extension.
pub fn write_file(path: &Path, meta: &CanonicalMetadata) -> Result<WriteOutcome, Error> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    let format = AudioFormat::from_path(path)?;
    Ok(TagScheme::for_format(format).write_file(path, meta)?)
}

fn load_id3(path: &Path) -> Result<Tag, MetadataError> {
    id3::no_tag_ok(Tag::read_from_path(path))
        .map(Option::unwrap_or_default)
        .map_err(|e| MetadataError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// The file's existing tag of `tag_type` converted to its native type, or an
/// empty one when the file has none yet.
fn load_lofty<T>(path: &Path, tag_type: TagType) -> Result<T, MetadataError>
where
    T: From<lofty::tag::Tag> + Default,
{
    let tagged = lofty::read_from_path(path).map_err(|e| MetadataError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(tagged
        .tag(tag_type)
        .cloned()
        .map(T::from)
        .unwrap_or_default())
}
