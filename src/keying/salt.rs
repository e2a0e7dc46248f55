//! The shared, immutable salt context.

use super::key::SortKey;
use crate::encoding::encode_candidate;
use crate::error::TieError;
use sha2::{Digest, Sha512};
use std::fmt;

/// Version tag of the framing and hashing revision in force.
///
/// Any change to framing, hash choice, or ordering rule must change this
/// value: outputs of different revisions are not expected to agree.
pub const VERSION: &[u8] = b"STAR-TIE-512-v1";

/// Hash context summarizing a whole candidate set plus magic.
///
/// A `Salt` is never extended in place after construction; key
/// derivation works on clones, so one salt serves every candidate.
#[derive(Clone)]
pub struct Salt {
    context: Sha512,
    candidates: usize,
}

impl Salt {
    /// Builds the salt for `candidates` and `magic`.
    ///
    /// Candidates are re-sorted by raw UTF-8 name bytes before hashing,
    /// so the caller's iteration order has no effect.
    ///
    /// The stream is `VERSION || magic` followed by every candidate frame.
    /// The magic goes in verbatim, so an empty set with empty magic
    /// hashes exactly `VERSION`.
    ///
    /// # Errors
    ///
    /// [`TieError::DuplicateName`] if a name occurs twice, and
    /// [`TieError::FrameTooLong`] if a name cannot be framed.
    ///
    /// # Examples
    ///
    /// ```
    /// use star_tie::keying::Salt;
    ///
    /// let forward = Salt::compute([("A", 0), ("B", 1)], b"").unwrap();
    /// let backward = Salt::compute([("B", 1), ("A", 0)], b"").unwrap();
    /// assert_eq!(forward.fingerprint(), backward.fingerprint());
    /// ```
    pub fn compute<'a, I>(candidates: I, magic: &[u8]) -> Result<Self, TieError>
    where
        I: IntoIterator<Item = (&'a str, u128)>,
    {
        let mut ordered: Vec<(&str, u128)> = candidates.into_iter().collect();
        ordered.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        if let Some(pair) = ordered.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(TieError::DuplicateName {
                name: pair[0].0.to_string(),
            });
        }

        let mut context = Sha512::new();
        context.update(VERSION);
        context.update(magic);
        for &(name, score) in &ordered {
            context.update(encode_candidate(name, score)?);
        }

        Ok(Self {
            context,
            candidates: ordered.len(),
        })
    }

    /// Number of candidates folded into this salt.
    pub fn candidate_count(&self) -> usize {
        self.candidates
    }

    /// Finalizes a copy of the salt context.
    ///
    /// Useful as a log-safe identifier of one draw; the salt itself is
    /// left untouched.
    pub fn fingerprint(&self) -> SortKey {
        SortKey::from_digest(&self.context.clone().finalize())
    }

    pub(super) fn context(&self) -> &Sha512 {
        &self.context
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Salt")
            .field("candidates", &self.candidates)
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}
