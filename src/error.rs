//! Error taxonomy for permutation requests.

use thiserror::Error;

/// Coarse classification of a [`TieError`].
///
/// Callers that only care about "whose fault was it" can match on this
/// instead of the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorKind {
    /// A score, name, or request is outside what the framing accepts.
    InvalidInput,

    /// A boundary value has the wrong type (e.g. magic that is not bytes).
    TypeMismatch,

    /// Two candidates derived identical keys under [`TieBreak::Reject`].
    ///
    /// [`TieBreak::Reject`]: crate::permute::TieBreak::Reject
    KeyCollision,
}

/// Errors raised while validating, encoding, or ordering candidates.
///
/// Everything except [`TieError::KeyCollision`] is detected before any
/// hashing starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TieError {
    /// Score is negative or does not fit in 128 bits.
    #[error("invalid input: score for candidate {name:?} must be a non-negative 128-bit integer")]
    InvalidScore {
        /// Candidate whose score was rejected.
        name: String,
    },

    /// The same name was supplied more than once.
    #[error("invalid input: duplicate candidate name {name:?}")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },

    /// A field is too long for its 32-bit length prefix.
    #[error("invalid input: {field} is {len} bytes, longer than a 32-bit length prefix allows")]
    FrameTooLong {
        /// Which field overflowed.
        field: &'static str,
        /// Byte length of the offending field.
        len: usize,
    },

    /// Malformed boundary input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A boundary value has the wrong type.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// Two keys were byte-for-byte identical.
    #[error("key collision between candidates {first:?} and {second:?}")]
    KeyCollision {
        /// Name that sorts first by raw UTF-8 bytes.
        first: String,
        /// Name that sorts second by raw UTF-8 bytes.
        second: String,
    },
}

impl TieError {
    /// Returns the coarse classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TieError::InvalidScore { .. }
            | TieError::DuplicateName { .. }
            | TieError::FrameTooLong { .. }
            | TieError::InvalidInput(_) => ErrorKind::InvalidInput,
            TieError::TypeMismatch(_) => ErrorKind::TypeMismatch,
            TieError::KeyCollision { .. } => ErrorKind::KeyCollision,
        }
    }
}
