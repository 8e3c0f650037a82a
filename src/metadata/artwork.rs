use std::io::Cursor;

use lofty::picture::{Picture, PictureType};

use crate::error::MetadataError;

use super::model::Artwork;

pub(super) fn from_lofty(picture: &Picture) -> Artwork {
    Artwork {
        data: picture.data().to_vec(),
        mime: picture
            .mime_type()
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        description: picture.description().unwrap_or_default().to_string(),
    }
}

/// Front cover built from raw image bytes; the MIME type is sniffed from
/// the data, so unrecognised images are rejected.
pub(super) fn to_lofty(art: &Artwork) -> Result<Picture, MetadataError> {
    art.validate()?;
    let mut picture = Picture::from_reader(&mut Cursor::new(art.data.as_slice()))
        .map_err(|e| MetadataError::Artwork(e.to_string()))?;
    picture.set_pic_type(PictureType::CoverFront);
    if !art.description.is_empty() {
        picture.set_description(Some(art.description.clone()));
    }
    Ok(picture)
}
