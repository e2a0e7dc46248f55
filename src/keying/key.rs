//! Per-candidate sort keys.

use super::salt::Salt;
use crate::encoding::encode_candidate;
use crate::error::TieError;
use sha2::Digest;
use std::array::TryFromSliceError;
use std::fmt;

/// Width of a SHA-512 digest in bytes.
pub const KEY_LEN: usize = 64;

/// A candidate's opaque 64-byte sort key.
///
/// Ordering is plain byte-lexicographic comparison of the digest, which
/// is identical on every platform regardless of native byte order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey([u8; KEY_LEN]);

impl SortKey {
    /// Derives the key for one candidate from a shared salt.
    ///
    /// The salt is cloned, extended with the candidate's frame, and
    /// finalized; `salt` itself is not modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use star_tie::keying::{Salt, SortKey};
    ///
    /// let salt = Salt::compute([("A", 0), ("B", 1)], b"").unwrap();
    /// let a = SortKey::derive(&salt, "A", 0).unwrap();
    /// assert_eq!(a, SortKey::derive(&salt, "A", 0).unwrap());
    /// assert_ne!(a, SortKey::derive(&salt, "B", 1).unwrap());
    /// ```
    pub fn derive(salt: &Salt, name: &str, score: u128) -> Result<Self, TieError> {
        let mut context = salt.context().clone();
        context.update(encode_candidate(name, score)?);
        Ok(Self::from_digest(&context.finalize()))
    }

    /// Wraps a SHA-512 digest, which is always [`KEY_LEN`] bytes.
    pub(crate) fn from_digest(digest: &[u8]) -> Self {
        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(digest);
        Self(bytes)
    }

    /// Returns the digest bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Lowercase hexadecimal rendering of the digest.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl From<[u8; KEY_LEN]> for SortKey {
    fn from(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for SortKey {
    type Error = TryFromSliceError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; KEY_LEN]>::try_from(bytes).map(Self)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First 8 bytes are plenty to tell keys apart in logs.
        write!(f, "SortKey(")?;
        for b in &self.0[..8] {
            write!(f, "{b:02x}")?;
        }
        write!(f, "…)")
    }
}
