//! Deterministic, unpredictable tie-break permutations.
//!
//! Given candidates with non-negative integer scores, produces an order
//! that is:
//!
//! - **Fully determined by the inputs**: any implementation of the
//!   `STAR-TIE-512-v1` byte contract, in any language, yields the same
//!   order for the same candidate set and magic.
//! - **Unpredictable**: every key depends on a SHA-512 salt that
//!   summarizes the whole candidate set, so no name or score can be tuned
//!   to land early across the plausible range of the others' scores.
//! - **Optionally seeded** with caller-supplied magic bytes (see
//!   [`permute::random_magic`]) to remove residual predictability.
//!
//! # Pipeline
//!
//! - [`encoding`]: length-prefixed framing of names and scores.
//! - [`keying`]: the shared [`Salt`](keying::Salt) and per-candidate
//!   [`SortKey`](keying::SortKey).
//! - [`permute`]: candidate sets, configuration, and the sorter.
//! - `wire` (feature `serde`): JSON requests and a line-delimited server.
//!
//! # Example
//!
//! ```
//! let score = [("A", 0), ("B", 1), ("C", 2), ("D", 3), ("E", 4)];
//! assert_eq!(star_tie::permute(score)?, ["A", "B", "C", "D", "E"]);
//! # Ok::<(), star_tie::TieError>(())
//! ```

pub mod encoding;
pub mod error;
pub mod keying;
pub mod permute;
#[cfg(feature = "serde")]
pub mod wire;

pub use error::{ErrorKind, TieError};
pub use keying::VERSION;
pub use permute::{permute, permute_with_magic};
