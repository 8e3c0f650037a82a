//! Format-neutral metadata and its mapping onto native tag containers.
//!
//! Each tag family has a [`Mapper`] that is pure over the native tag value.
//! [`TagScheme`] picks the mapper for a file from its format and does the
//! loading and saving.

mod artwork;
mod atom;
mod id3v2;
mod mapper;
mod model;
mod scheme;
mod vorbis;

pub use atom::AtomMapper;
pub use id3v2::Id3Mapper;
pub use mapper::Mapper;
pub use model::{Artwork, CanonicalMetadata, MetadataOverrides};
pub use scheme::{TagScheme, WriteOutcome, read_file, write_file};
pub use vorbis::VorbisMapper;
