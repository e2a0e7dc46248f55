//! Permutation configuration and tie-break policy.

use rand::RngCore;
use std::fmt;

/// Magic length that gives strong protection against manipulation at
/// negligible cost.
pub const RECOMMENDED_MAGIC_LEN: usize = 8;

/// What to do when two candidates derive byte-identical keys.
///
/// With 64-byte keys this only happens on a SHA-512 collision, but the
/// outcome must still be pinned down rather than left to the sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TieBreak {
    /// Order colliding candidates by their raw UTF-8 name bytes.
    #[default]
    EncodedName,

    /// Fail with [`TieError::KeyCollision`](crate::TieError::KeyCollision).
    Reject,
}

/// Draws [`RECOMMENDED_MAGIC_LEN`] bytes from the thread-local CSPRNG.
///
/// Suitable as unguessable magic when nobody can observe the draw
/// before the candidate set is fixed.
pub fn random_magic() -> [u8; RECOMMENDED_MAGIC_LEN] {
    let mut magic = [0u8; RECOMMENDED_MAGIC_LEN];
    rand::rng().fill_bytes(&mut magic);
    magic
}

/// Configuration for a permutation run.
///
/// # Examples
///
/// ```
/// use star_tie::permute::{PermuteConfig, TieBreak};
///
/// let config = PermuteConfig::default()
///     .with_magic(7u64.to_le_bytes())
///     .with_tie_break(TieBreak::Reject)
///     .with_parallel(false);
/// assert_eq!(config.magic.len(), 8);
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PermuteConfig {
    /// Extra entropy folded into the salt. Empty means none; any length
    /// is accepted.
    pub magic: Vec<u8>,

    /// Policy for byte-identical keys.
    pub tie_break: TieBreak,

    /// Derive keys on the rayon pool.
    ///
    /// Only honored with the `parallel` feature; output is identical
    /// either way.
    pub parallel: bool,
}

impl PermuteConfig {
    pub fn with_magic(mut self, magic: impl Into<Vec<u8>>) -> Self {
        self.magic = magic.into();
        self
    }

    /// Uses freshly drawn [`random_magic`].
    pub fn with_random_magic(self) -> Self {
        self.with_magic(random_magic())
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

// Magic may still be secret when configs are logged.
impl fmt::Debug for PermuteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermuteConfig")
            .field("magic_len", &self.magic.len())
            .field("tie_break", &self.tie_break)
            .field("parallel", &self.parallel)
            .finish()
    }
}
