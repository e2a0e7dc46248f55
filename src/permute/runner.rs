//! Key derivation and final ordering.

use super::config::{PermuteConfig, TieBreak};
use super::types::{Candidate, CandidateSet, ScoreValue};
use crate::error::TieError;
use crate::keying::{Salt, SortKey};
use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of a permutation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    /// Candidate names in tie-break order (first = wins the tie).
    pub order: Vec<String>,

    /// Sort key of each entry in `order`, same positions.
    pub keys: Vec<SortKey>,

    /// Finalized copy of the salt; identifies the draw without
    /// revealing the magic.
    pub salt_fingerprint: SortKey,
}

impl Permutation {
    /// Names in order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Zero-based position of `name`, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.order.iter().position(|n| n == name)
    }

    /// Consumes the result, keeping only the names.
    pub fn into_names(self) -> Vec<String> {
        self.order
    }
}

/// Computes tie-break permutations.
pub struct Permuter;

impl Permuter {
    /// Orders `candidates` under `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use star_tie::permute::{CandidateSet, PermuteConfig, Permuter};
    ///
    /// let set = CandidateSet::from_scores([("A", 0), ("B", 1), ("C", 2), ("D", 3), ("E", 4)])?;
    /// let result = Permuter::run(&set, &PermuteConfig::default())?;
    /// assert_eq!(result.names(), ["A", "B", "C", "D", "E"]);
    /// # Ok::<(), star_tie::TieError>(())
    /// ```
    pub fn run(candidates: &CandidateSet, config: &PermuteConfig) -> Result<Permutation, TieError> {
        let salt = Salt::compute(candidates.iter().map(|c| (c.name, c.score)), &config.magic)?;
        let salt_fingerprint = salt.fingerprint();
        tracing::debug!(
            candidates = candidates.len(),
            magic_len = config.magic.len(),
            salt = %salt_fingerprint,
            "computing tie-break permutation"
        );

        let entries: Vec<Candidate<'_>> = candidates.iter().collect();
        let keyed = derive_keys(&salt, &entries, config.parallel)?;
        let ordered = order_keyed(keyed, config.tie_break)?;

        let (keys, order) = ordered
            .into_iter()
            .map(|(key, candidate)| (key, candidate.name.to_string()))
            .unzip();

        Ok(Permutation {
            order,
            keys,
            salt_fingerprint,
        })
    }
}

/// Derives every candidate's key against one shared salt.
fn derive_keys<'a>(
    salt: &Salt,
    entries: &[Candidate<'a>],
    parallel: bool,
) -> Result<Vec<(SortKey, Candidate<'a>)>, TieError> {
    let derive = |candidate: &Candidate<'a>| -> Result<(SortKey, Candidate<'a>), TieError> {
        let key = SortKey::derive(salt, candidate.name, candidate.score)?;
        tracing::trace!(name = candidate.name, key = ?key, "derived key");
        Ok((key, *candidate))
    };

    #[cfg(feature = "parallel")]
    {
        if parallel {
            return entries.par_iter().map(derive).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    entries.iter().map(derive).collect()
}

/// Sorts ascending by key, falling back to raw name bytes on equal keys.
fn order_keyed<'a>(
    mut keyed: Vec<(SortKey, Candidate<'a>)>,
    tie_break: TieBreak,
) -> Result<Vec<(SortKey, Candidate<'a>)>, TieError> {
    keyed.sort_unstable_by(compare_entries);

    if tie_break == TieBreak::Reject {
        if let Some(pair) = keyed.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(TieError::KeyCollision {
                first: pair[0].1.name.to_string(),
                second: pair[1].1.name.to_string(),
            });
        }
    }
    Ok(keyed)
}

fn compare_entries(a: &(SortKey, Candidate<'_>), b: &(SortKey, Candidate<'_>)) -> Ordering {
    a.0.cmp(&b.0)
        .then_with(|| a.1.name.as_bytes().cmp(b.1.name.as_bytes()))
}

/// Returns the tie-break order of the keys of `score`, with no magic.
///
/// `score` is any iterable of `(name, score)` pairs: a `&HashMap`, a
/// `BTreeMap`, an array of tuples. Iteration order never matters.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// let score: HashMap<String, u64> = [("A", 0), ("B", 1), ("C", 2), ("D", 3), ("E", 4)]
///     .into_iter()
///     .map(|(name, stars)| (name.to_string(), stars))
///     .collect();
/// assert_eq!(star_tie::permute(&score)?, ["A", "B", "C", "D", "E"]);
/// # Ok::<(), star_tie::TieError>(())
/// ```
pub fn permute<I, N, S>(score: I) -> Result<Vec<String>, TieError>
where
    I: IntoIterator<Item = (N, S)>,
    N: Into<String>,
    S: ScoreValue,
{
    permute_with_magic(score, &[])
}

/// Like [`permute`], folding `magic` into the salt.
///
/// # Examples
///
/// ```
/// let score = [("A", 0), ("B", 1), ("C", 2), ("D", 3), ("E", 4)];
/// let order = star_tie::permute_with_magic(score, &1u64.to_le_bytes())?;
/// assert_eq!(order, ["B", "D", "A", "E", "C"]);
/// # Ok::<(), star_tie::TieError>(())
/// ```
pub fn permute_with_magic<I, N, S>(score: I, magic: &[u8]) -> Result<Vec<String>, TieError>
where
    I: IntoIterator<Item = (N, S)>,
    N: Into<String>,
    S: ScoreValue,
{
    let candidates = CandidateSet::from_scores(score)?;
    let config = PermuteConfig::default().with_magic(magic);
    Ok(Permuter::run(&candidates, &config)?.into_names())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abcde() -> CandidateSet {
        CandidateSet::from_scores([("A", 0), ("B", 1), ("C", 2), ("D", 3), ("E", 4)]).unwrap()
    }

    fn squash(names: &[String]) -> String {
        names.concat()
    }

    /// Heap's algorithm; every ordering of `items`.
    fn all_orderings<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
        fn heap<T: Clone>(k: usize, items: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
            if k <= 1 {
                out.push(items.clone());
                return;
            }
            heap(k - 1, items, out);
            for i in 0..k - 1 {
                if k % 2 == 0 {
                    items.swap(i, k - 1);
                } else {
                    items.swap(0, k - 1);
                }
                heap(k - 1, items, out);
            }
        }
        let mut items = items.to_vec();
        let mut out = Vec::new();
        heap(items.len(), &mut items, &mut out);
        out
    }

    fn key(first: u8) -> SortKey {
        let mut bytes = [0u8; crate::keying::KEY_LEN];
        bytes[0] = first;
        SortKey::from(bytes)
    }

    #[test]
    fn test_reference_order() {
        let result = Permuter::run(&abcde(), &PermuteConfig::default()).unwrap();
        assert_eq!(squash(result.names()), "ABCDE");
        assert_eq!(result.len(), 5);
        assert_eq!(result.position("A"), Some(0));
        assert_eq!(result.position("E"), Some(4));
        assert_eq!(result.position("Z"), None);
    }

    #[test]
    fn test_keys_ascending() {
        let result = Permuter::run(&abcde(), &PermuteConfig::default()).unwrap();
        assert_eq!(result.keys.len(), result.order.len());
        assert!(result.keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_every_input_order_agrees() {
        let pairs = [("A", 0u64), ("B", 1), ("C", 2), ("D", 3), ("E", 4)];
        let orderings = all_orderings(&pairs);
        assert_eq!(orderings.len(), 120);
        for ordering in orderings {
            assert_eq!(squash(&permute(ordering).unwrap()), "ABCDE");
        }
    }

    #[test]
    fn test_default_magic_is_empty() {
        let pairs = [("A", 0), ("B", 1), ("C", 2), ("D", 3), ("E", 4)];
        assert_eq!(
            permute(pairs).unwrap(),
            permute_with_magic(pairs, b"").unwrap()
        );
    }

    #[test]
    fn test_magic_sequence() {
        let expected = [
            "DAECB", "BDAEC", "AEBCD", "CDAEB", "CDEAB", "BCEAD", "EABCD", "CADEB", "ABDCE",
            "ACBDE",
        ];
        let pairs = [("A", 0), ("B", 1), ("C", 2), ("D", 3), ("E", 4)];
        for (magic, want) in (0u64..10).zip(expected) {
            let got = permute_with_magic(pairs, &magic.to_le_bytes()).unwrap();
            assert_eq!(squash(&got), want, "magic {magic}");
        }
    }

    #[test]
    fn test_score_perturbations() {
        // (name, delta, expected order) for one-point changes to ABCDE.
        let cases = [
            ("A", 1i64, "BCAED"),
            ("B", 1, "DACBE"),
            ("B", -1, "ECBDA"),
            ("C", 1, "ABECD"),
            ("C", -1, "EADCB"),
            ("D", 1, "ECBDA"),
            ("D", -1, "BDCEA"),
            ("E", 1, "ACBED"),
            ("E", -1, "ABEDC"),
        ];
        let base = [("A", 0i64), ("B", 1), ("C", 2), ("D", 3), ("E", 4)];
        for (name, delta, want) in cases {
            let changed: Vec<(&str, i64)> = base
                .iter()
                .map(|&(n, s)| if n == name { (n, s + delta) } else { (n, s) })
                .collect();
            assert_eq!(squash(&permute(changed).unwrap()), want, "{name}{delta:+}");
        }
    }

    #[test]
    fn test_empty_and_single() {
        let empty: [(&str, u64); 0] = [];
        assert!(permute(empty).unwrap().is_empty());
        assert_eq!(permute([("solo", 42)]).unwrap(), ["solo"]);

        let result = Permuter::run(&CandidateSet::new(), &PermuteConfig::default()).unwrap();
        assert!(result.is_empty());
        assert!(result.keys.is_empty());
    }

    #[test]
    fn test_negative_score_fails_before_hashing() {
        let err = permute([("A", 0), ("B", -1)]).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_tie_break_falls_back_to_name_bytes() {
        let keyed = vec![
            (key(7), Candidate { name: "é", score: 0 }),
            (key(7), Candidate { name: "Z", score: 0 }),
            (key(1), Candidate { name: "z", score: 0 }),
            (key(7), Candidate { name: "a", score: 0 }),
        ];
        let ordered = order_keyed(keyed, TieBreak::EncodedName).unwrap();
        let names: Vec<&str> = ordered.iter().map(|(_, c)| c.name).collect();
        assert_eq!(names, ["z", "Z", "a", "é"]);
    }

    #[test]
    fn test_tie_break_reject() {
        let keyed = vec![
            (key(3), Candidate { name: "b", score: 0 }),
            (key(3), Candidate { name: "a", score: 9 }),
            (key(1), Candidate { name: "c", score: 0 }),
        ];
        let err = order_keyed(keyed, TieBreak::Reject).unwrap_err();
        assert_eq!(
            err,
            TieError::KeyCollision {
                first: "a".into(),
                second: "b".into()
            }
        );
    }

    #[test]
    fn test_reject_passes_without_collision() {
        let config = PermuteConfig::default().with_tie_break(TieBreak::Reject);
        let result = Permuter::run(&abcde(), &config).unwrap();
        assert_eq!(squash(result.names()), "ABCDE");
    }

    #[test]
    fn test_salt_fingerprint_reported() {
        let plain = Permuter::run(&abcde(), &PermuteConfig::default()).unwrap();
        let magic = Permuter::run(&abcde(), &PermuteConfig::default().with_magic(b"x".to_vec()))
            .unwrap();
        assert_ne!(plain.salt_fingerprint, magic.salt_fingerprint);
    }

    #[test]
    fn test_scores_beyond_u64() {
        let wide = permute([("A", u128::from(u64::MAX) + 1), ("B", 1u128)]).unwrap();
        assert_eq!(wide, ["A", "B"]);
        let narrow = permute([("A", u128::from(u64::MAX)), ("B", 1u128)]).unwrap();
        assert_eq!(narrow, ["B", "A"]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let set = CandidateSet::from_scores((0..200u64).map(|i| (format!("cand-{i}"), i * 7))).unwrap();
        let sequential = Permuter::run(&set, &PermuteConfig::default()).unwrap();
        let parallel =
            Permuter::run(&set, &PermuteConfig::default().with_parallel(true)).unwrap();
        assert_eq!(sequential, parallel);
    }
}
