//! Audio buffers, slicing and the codec gateway.
//!
//! The core never touches encoded bytes itself: `CodecGateway` decodes a file
//! into an interleaved `AudioBuffer` and encodes a buffer back to disk.
//! Everything in between (slicing, block edits) works on sample frames.

mod codec;
mod edit;
mod slice;
mod types;

pub use codec::*;
pub use edit::*;
pub use slice::*;
pub use types::*;
