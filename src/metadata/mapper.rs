use crate::error::MetadataError;

use super::model::CanonicalMetadata;

/// Translation between one native tag container and [`CanonicalMetadata`].
///
/// `write` is a full replace: every field the mapper manages is cleared
/// first, so a field absent from `meta` is absent afterwards. Fields the
/// mapper does not manage are left alone.
pub trait Mapper {
    type Native;

    fn read(native: &Self::Native) -> CanonicalMetadata;

    fn write(native: &mut Self::Native, meta: &CanonicalMetadata) -> Result<(), MetadataError>;
}
