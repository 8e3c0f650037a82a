use lofty::ogg::{OggPictureStorage, VorbisComments};
use lofty::picture::{PictureInformation, PictureType};

use crate::error::MetadataError;

use super::artwork;
use super::mapper::Mapper;
use super::model::{Artwork, CanonicalMetadata, non_blank};

const TITLE: &str = "TITLE";
const ARTIST: &str = "ARTIST";
const ALBUM: &str = "ALBUM";
const ALBUMARTIST: &str = "ALBUMARTIST";
const DATE: &str = "DATE";
const GENRE: &str = "GENRE";
const TRACKNUMBER: &str = "TRACKNUMBER";
const TRACKTOTAL: &str = "TRACKTOTAL";
const DISCNUMBER: &str = "DISCNUMBER";
const DISCTOTAL: &str = "DISCTOTAL";
const COMPOSER: &str = "COMPOSER";
const COMMENT: &str = "COMMENT";

const MANAGED: [&str; 12] = [
    TITLE,
    ARTIST,
    ALBUM,
    ALBUMARTIST,
    DATE,
    GENRE,
    TRACKNUMBER,
    TRACKTOTAL,
    DISCNUMBER,
    DISCTOTAL,
    COMPOSER,
    COMMENT,
];

/// Vorbis comments (FLAC, Ogg Vorbis).
pub struct VorbisMapper;

fn get(tag: &VorbisComments, key: &str) -> Option<String> {
    tag.get(key).and_then(non_blank)
}

impl Mapper for VorbisMapper {
    type Native = VorbisComments;

    fn read(tag: &VorbisComments) -> CanonicalMetadata {
        let pictures = tag.pictures();
        let cover = pictures
            .iter()
            .find(|(p, _)| p.pic_type() == PictureType::CoverFront)
            .or_else(|| pictures.first())
            .map(|(p, _)| artwork::from_lofty(p));

        CanonicalMetadata {
            title: get(tag, TITLE),
            artist: get(tag, ARTIST),
            album: get(tag, ALBUM),
            albumartist: get(tag, ALBUMARTIST),
            date: get(tag, DATE),
            genre: get(tag, GENRE),
            track: get(tag, TRACKNUMBER),
            track_total: get(tag, TRACKTOTAL),
            disc: get(tag, DISCNUMBER),
            disc_total: get(tag, DISCTOTAL),
            composer: get(tag, COMPOSER),
            comment: get(tag, COMMENT),
            artwork: cover,
        }
    }

    fn write(tag: &mut VorbisComments, meta: &CanonicalMetadata) -> Result<(), MetadataError> {
        for key in MANAGED {
            let _ = tag.remove(key).count();
        }
        let stale: Vec<PictureType> = tag.pictures().iter().map(|(p, _)| p.pic_type()).collect();
        for pic_type in stale {
            tag.remove_picture_type(pic_type);
        }

        let fields = [
            (TITLE, &meta.title),
            (ARTIST, &meta.artist),
            (ALBUM, &meta.album),
            (ALBUMARTIST, &meta.albumartist),
            (DATE, &meta.date),
            (GENRE, &meta.genre),
            (TRACKNUMBER, &meta.track),
            (TRACKTOTAL, &meta.track_total),
            (DISCNUMBER, &meta.disc),
            (DISCTOTAL, &meta.disc_total),
            (COMPOSER, &meta.composer),
            (COMMENT, &meta.comment),
        ];
        for (key, value) in fields {
            if let Some(v) = value {
                tag.insert(key.to_string(), v.clone());
            }
        }

        if let Some(art) = &meta.artwork {
            insert_cover(tag, art)?;
        }
        Ok(())
    }
}

fn insert_cover(tag: &mut VorbisComments, art: &Artwork) -> Result<(), MetadataError> {
    let picture = artwork::to_lofty(art)?;
    let info = PictureInformation::from_picture(&picture).unwrap_or_default();
    tag.insert_picture(picture, Some(info))
        .map_err(|e| MetadataError::Artwork(e.to_string()))?;
    Ok(())
}
