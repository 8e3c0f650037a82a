use id3::frame::{Comment, Picture, PictureType};
use id3::{Tag, TagLike};

use crate::error::MetadataError;

use super::mapper::Mapper;
use super::model::{Artwork, CanonicalMetadata, join_pair, non_blank, split_pair};

/// Text frames cleared before every write. `TYER` is the ID3v2.3 date.
const MANAGED_TEXT: [&str; 10] = [
    "TIT2", "TPE1", "TALB", "TPE2", "TDRC", "TYER", "TCON", "TRCK", "TPOS", "TCOM",
];

/// ID3v2 frames (MP3).
pub struct Id3Mapper;

fn text(tag: &Tag, id: &str) -> Option<String> {
    tag.get(id)
        .and_then(|f| f.content().text())
        .and_then(non_blank)
}

impl Mapper for Id3Mapper {
    type Native = Tag;

    fn read(tag: &Tag) -> CanonicalMetadata {
        let (track, track_total) = text(tag, "TRCK")
            .map(|v| split_pair(&v))
            .unwrap_or_default();
        let (disc, disc_total) = text(tag, "TPOS")
            .map(|v| split_pair(&v))
            .unwrap_or_default();

        let artwork = tag
            .pictures()
            .find(|p| p.picture_type == PictureType::CoverFront)
            .or_else(|| tag.pictures().next())
            .map(|p| Artwork {
                data: p.data.clone(),
                mime: p.mime_type.clone(),
                description: p.description.clone(),
            });

        CanonicalMetadata {
            title: text(tag, "TIT2"),
            artist: text(tag, "TPE1"),
            album: text(tag, "TALB"),
            albumartist: text(tag, "TPE2"),
            date: text(tag, "TDRC").or_else(|| text(tag, "TYER")),
            genre: text(tag, "TCON"),
            track,
            track_total,
            disc,
            disc_total,
            composer: text(tag, "TCOM"),
            comment: tag.comments().find_map(|c| non_blank(&c.text)),
            artwork,
        }
    }

    fn write(tag: &mut Tag, meta: &CanonicalMetadata) -> Result<(), MetadataError> {
        for id in MANAGED_TEXT {
            tag.remove(id);
        }
        tag.remove_comment(None, None);
        tag.remove_all_pictures();

        let frames = [
            ("TIT2", &meta.title),
            ("TPE1", &meta.artist),
            ("TALB", &meta.album),
            ("TPE2", &meta.albumartist),
            ("TDRC", &meta.date),
            ("TCON", &meta.genre),
            ("TCOM", &meta.composer),
        ];
        for (id, value) in frames {
            if let Some(v) = value {
                tag.set_text(id, v.as_str());
            }
        }
        if let Some(v) = join_pair(meta.track.as_deref(), meta.track_total.as_deref()) {
            tag.set_text("TRCK", v);
        }
        if let Some(v) = join_pair(meta.disc.as_deref(), meta.disc_total.as_deref()) {
            tag.set_text("TPOS", v);
        }

        if let Some(text) = &meta.comment {
            tag.add_frame(Comment {
                lang: "eng".to_string(),
                description: String::new(),
                text: text.clone(),
            });
        }
        if let Some(art) = &meta.artwork {
            art.validate()?;
            tag.add_frame(Picture {
                mime_type: art.mime.clone(),
                picture_type: PictureType::CoverFront,
                description: art.description.clone(),
                data: art.data.clone(),
            });
        }
        Ok(())
    }
}
