//! Segments: validated time intervals to extract from a track.
//!
//! `SegmentEntry` holds what the user typed, `plan` turns a list of entries
//! into `Segment`s checked against the track duration.

mod model;
mod plan;

pub use model::*;
pub use plan::*;
