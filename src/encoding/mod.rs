//! Self-delimiting byte framing for names and scores.
//!
//! Every field is written as a 4-byte little-endian byte count followed
//! by the field's bytes. Names are UTF-8; scores are their minimal
//! little-endian magnitude (zero is the empty magnitude). Because every
//! frame announces its own length, any concatenation of frames parses
//! back in exactly one way, whatever bytes the fields contain.
//!
//! The magic is not framed: it follows the fixed-width version tag
//! verbatim at the start of the salt stream.
//!
//! These rules are part of the `STAR-TIE-512-v1` contract. Another
//! implementation that frames differently will disagree silently.

mod frame;

pub use frame::{
    encode_candidate, encode_name, encode_score, score_magnitude,
    LENGTH_PREFIX_BYTES, MAX_FRAME_LEN,
};
