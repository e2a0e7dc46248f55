//! Salt computation and per-candidate key derivation.
//!
//! The salt is a SHA-512 context that has absorbed the version tag, the
//! raw magic bytes, and every candidate frame in canonical (raw UTF-8
//! name byte) order. Each candidate's [`SortKey`] is that context, cloned,
//! extended with the candidate's own frame, and finalized.
//!
//! The salt summarizes the whole candidate set, so changing any one
//! score, name, or the magic changes every key.

mod key;
mod salt;

pub use key::{SortKey, KEY_LEN};
pub use salt::{Salt, VERSION};
