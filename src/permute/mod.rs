//! Tie-break permutation of scored candidates.
//!
//! [`Permuter::run`] drives the full pipeline: validate the candidate
//! set, build the [`Salt`](crate::keying::Salt), derive one
//! [`SortKey`](crate::keying::SortKey) per candidate, and sort ascending
//! by key. [`permute`] and [`permute_with_magic`] wrap it for callers
//! that only want the names.
//!
//! # Determinism
//!
//! The output depends only on the set of `(name, score)` pairs, the
//! magic bytes, and the version tag. Input iteration order, thread
//! count, and platform byte order have no effect.

mod config;
mod runner;
mod types;

pub use config::{random_magic, PermuteConfig, TieBreak, RECOMMENDED_MAGIC_LEN};
pub use runner::{permute, permute_with_magic, Permutation, Permuter};
pub use types::{Candidate, CandidateSet, ScoreValue};
