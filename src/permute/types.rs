//! Candidate sets and score conversion.

use crate::encoding::MAX_FRAME_LEN;
use crate::error::TieError;
use std::collections::btree_map::{BTreeMap, Entry};

/// A value that can serve as a candidate's score.
///
/// Implemented for every primitive integer type and references to them.
/// Conversion fails for negative values. Every non-negative primitive
/// value fits, up to `u128::MAX`.
///
/// # Examples
///
/// ```
/// use star_tie::permute::ScoreValue;
///
/// assert_eq!(7i32.to_score(), Some(7));
/// assert_eq!((-1i64).to_score(), None);
/// assert_eq!((&42u8).to_score(), Some(42));
/// assert_eq!(u128::MAX.to_score(), Some(u128::MAX));
/// ```
pub trait ScoreValue {
    /// Returns the score as `u128`, or `None` when it is negative.
    fn to_score(&self) -> Option<u128>;
}

macro_rules! impl_score_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl ScoreValue for $t {
                fn to_score(&self) -> Option<u128> {
                    u128::try_from(*self).ok()
                }
            }
        )*
    };
}

impl_score_value!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl<T: ScoreValue + ?Sized> ScoreValue for &T {
    fn to_score(&self) -> Option<u128> {
        (**self).to_score()
    }
}

/// One candidate as seen by the keying stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// Candidate name.
    pub name: &'a str,
    /// Non-negative score.
    pub score: u128,
}

/// A validated mapping from candidate name to score.
///
/// Names are unique and every name fits a frame. Iteration order of the
/// underlying map is never relied upon when salting; the salt computer
/// re-sorts by raw UTF-8 bytes.
///
/// # Examples
///
/// ```
/// use star_tie::permute::CandidateSet;
///
/// let set = CandidateSet::new()
///     .with_candidate("Alice", 5)?
///     .with_candidate("Bob", 3)?;
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.get("Bob"), Some(3));
/// assert!(CandidateSet::new().with_candidate("Eve", -1).is_err());
/// # Ok::<(), star_tie::TieError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    scores: BTreeMap<String, u128>,
}

impl CandidateSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from `(name, score)` pairs.
    ///
    /// Accepts anything that iterates pairs: `&HashMap<String, u64>`,
    /// a `BTreeMap`, a `Vec` or an array of tuples.
    pub fn from_scores<I, N, S>(scores: I) -> Result<Self, TieError>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: ScoreValue,
    {
        let mut set = Self::new();
        for (name, score) in scores {
            set.insert(name, score)?;
        }
        Ok(set)
    }

    /// Adds one candidate.
    ///
    /// # Errors
    ///
    /// - [`TieError::InvalidScore`] for a negative score.
    /// - [`TieError::DuplicateName`] if the name is already present.
    /// - [`TieError::FrameTooLong`] if the name cannot be framed.
    pub fn insert<N, S>(&mut self, name: N, score: S) -> Result<(), TieError>
    where
        N: Into<String>,
        S: ScoreValue,
    {
        let name = name.into();
        if name.len() > MAX_FRAME_LEN {
            return Err(TieError::FrameTooLong {
                field: "name",
                len: name.len(),
            });
        }
        let Some(score) = score.to_score() else {
            return Err(TieError::InvalidScore { name });
        };
        match self.scores.entry(name) {
            Entry::Occupied(entry) => Err(TieError::DuplicateName {
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(score);
                Ok(())
            }
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_candidate<N, S>(mut self, name: N, score: S) -> Result<Self, TieError>
    where
        N: Into<String>,
        S: ScoreValue,
    {
        self.insert(name, score)?;
        Ok(self)
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Returns `true` if there are no candidates.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Score of `name`, if present.
    pub fn get(&self, name: &str) -> Option<u128> {
        self.scores.get(name).copied()
    }

    /// Returns `true` if `name` is a candidate.
    pub fn contains(&self, name: &str) -> bool {
        self.scores.contains_key(name)
    }

    /// Iterates over all candidates.
    pub fn iter(&self) -> impl Iterator<Item = Candidate<'_>> + '_ {
        self.scores.iter().map(|(name, &score)| Candidate {
            name: name.as_str(),
            score,
        })
    }
}
