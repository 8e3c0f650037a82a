use lofty::mp4::{Atom, AtomData, AtomIdent, Ilst};
use lofty::prelude::Accessor;
use tracing::warn;

use crate::error::MetadataError;

use super::artwork;
use super::mapper::Mapper;
use super::model::{CanonicalMetadata, non_blank};

const NAM: [u8; 4] = *b"\xa9nam";
const ART: [u8; 4] = *b"\xa9ART";
const ALB: [u8; 4] = *b"\xa9alb";
const AART: [u8; 4] = *b"aART";
const DAY: [u8; 4] = *b"\xa9day";
const GEN: [u8; 4] = *b"\xa9gen";
const WRT: [u8; 4] = *b"\xa9wrt";
const CMT: [u8; 4] = *b"\xa9cmt";
const TRKN: [u8; 4] = *b"trkn";
const DISK: [u8; 4] = *b"disk";
const COVR: [u8; 4] = *b"covr";

const MANAGED: [[u8; 4]; 11] = [NAM, ART, ALB, AART, DAY, GEN, WRT, CMT, TRKN, DISK, COVR];

/// iTunes-style `ilst` atoms (M4A). Track and disc are packed
/// `(number, total)` integers.
pub struct AtomMapper;

fn text(ilst: &Ilst, code: [u8; 4]) -> Option<String> {
    ilst.get(&AtomIdent::Fourcc(code))?
        .data()
        .find_map(|d| match d {
            AtomData::UTF8(s) => non_blank(s),
            _ => None,
        })
}

fn number(value: Option<u32>) -> Option<String> {
    value.filter(|n| *n > 0).map(|n| n.to_string())
}

/// Numeric value for a packed atom slot. Anything else cannot be stored.
fn packed(field: &str, value: Option<&str>) -> Option<u32> {
    let value = value?;
    match value.trim().parse::<u32>() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!(field, value, "not a number; dropped from mp4 tag");
            None
        }
    }
}

impl Mapper for AtomMapper {
    type Native = Ilst;

    fn read(ilst: &Ilst) -> CanonicalMetadata {
        let artwork = ilst.get(&AtomIdent::Fourcc(COVR)).and_then(|atom| {
            atom.data().find_map(|d| match d {
                AtomData::Picture(p) => Some(artwork::from_lofty(p)),
                _ => None,
            })
        });

        CanonicalMetadata {
            title: text(ilst, NAM),
            artist: text(ilst, ART),
            album: text(ilst, ALB),
            albumartist: text(ilst, AART),
            date: text(ilst, DAY),
            genre: text(ilst, GEN),
            track: number(ilst.track()),
            track_total: number(ilst.track_total()),
            disc: number(ilst.disk()),
            disc_total: number(ilst.disk_total()),
            composer: text(ilst, WRT),
            comment: text(ilst, CMT),
            artwork,
        }
    }

    fn write(ilst: &mut Ilst, meta: &CanonicalMetadata) -> Result<(), MetadataError> {
        for code in MANAGED {
            let _ = ilst.remove(&AtomIdent::Fourcc(code)).count();
        }

        let fields = [
            (NAM, &meta.title),
            (ART, &meta.artist),
            (ALB, &meta.album),
            (AART, &meta.albumartist),
            (DAY, &meta.date),
            (GEN, &meta.genre),
            (WRT, &meta.composer),
            (CMT, &meta.comment),
        ];
        for (code, value) in fields {
            if let Some(v) = value {
                ilst.insert(Atom::new(AtomIdent::Fourcc(code), AtomData::UTF8(v.clone())));
            }
        }

        if let Some(n) = packed("track", meta.track.as_deref()) {
            ilst.set_track(n);
            if let Some(total) = packed("track_total", meta.track_total.as_deref()) {
                ilst.set_track_total(total);
            }
        }
        if let Some(n) = packed("disc", meta.disc.as_deref()) {
            ilst.set_disk(n);
            if let Some(total) = packed("disc_total", meta.disc_total.as_deref()) {
                ilst.set_disk_total(total);
            }
        }

        if let Some(art) = &meta.artwork {
            let picture = artwork::to_lofty(art)?;
            ilst.insert(Atom::new(
                AtomIdent::Fourcc(COVR),
                AtomData::Picture(picture),
            ));
        }
        Ok(())
    }
}
