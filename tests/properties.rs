//! Property and statistical checks over random candidate sets.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use star_tie::permute::{CandidateSet, PermuteConfig, Permuter};
use star_tie::{permute, permute_with_magic};
use std::collections::{BTreeMap, HashMap};

fn scores_strategy() -> impl Strategy<Value = BTreeMap<String, u128>> {
    prop::collection::btree_map(".{0,12}", any::<u128>(), 0..16)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn output_is_a_bijection(scores in scores_strategy(), magic in prop::collection::vec(any::<u8>(), 0..16)) {
        let order = permute_with_magic(&scores, &magic).unwrap();
        prop_assert_eq!(order.len(), scores.len());
        let mut sorted = order.clone();
        sorted.sort();
        let keys: Vec<String> = scores.keys().cloned().collect();
        prop_assert_eq!(sorted, keys);
    }

    #[test]
    fn input_order_is_irrelevant(
        (pairs, shuffled) in scores_strategy().prop_flat_map(|scores| {
            let pairs: Vec<(String, u128)> = scores.into_iter().collect();
            (Just(pairs.clone()), Just(pairs).prop_shuffle())
        })
    ) {
        prop_assert_eq!(permute(pairs).unwrap(), permute(shuffled).unwrap());
    }

    #[test]
    fn repeated_calls_agree(scores in scores_strategy(), magic in prop::collection::vec(any::<u8>(), 0..16)) {
        let set = CandidateSet::from_scores(&scores).unwrap();
        let config = PermuteConfig::default().with_magic(magic);
        let first = Permuter::run(&set, &config).unwrap();
        let second = Permuter::run(&set, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn hash_map_and_btree_map_agree(scores in scores_strategy()) {
        let hashed: HashMap<String, u128> = scores.clone().into_iter().collect();
        prop_assert_eq!(permute(&hashed).unwrap(), permute(&scores).unwrap());
    }

    #[test]
    fn negative_scores_rejected(name in ".{0,8}", score in i64::MIN..0) {
        let err = permute([(name, score)]).unwrap_err();
        prop_assert_eq!(err.kind(), star_tie::ErrorKind::InvalidInput);
    }
}

#[test]
fn single_score_bump_changes_order() {
    // With 8 candidates an unchanged order has probability 1/8! per trial.
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let trials = 1000;
    let mut changed = 0;
    for _ in 0..trials {
        let mut scores: BTreeMap<String, u64> = (0..8)
            .map(|i| (format!("cand-{i}"), rng.random_range(0..5000)))
            .collect();
        let before = permute(&scores).unwrap();
        let target = format!("cand-{}", rng.random_range(0..8));
        if let Some(score) = scores.get_mut(&target) {
            *score += 1;
        }
        if permute(&scores).unwrap() != before {
            changed += 1;
        }
    }
    assert!(
        changed * 100 >= trials * 99,
        "only {changed} of {trials} bumps changed the order"
    );
}

#[test]
fn magic_spreads_orders_uniformly() {
    // Three candidates have six orders; 6000 magic values give 1000 each
    // in expectation. 20.52 is the 0.999 quantile of chi-square with 5 df.
    let score = [("X", 1), ("Y", 2), ("Z", 3)];
    let mut counts: HashMap<Vec<String>, usize> = HashMap::new();
    for magic in 0u64..6000 {
        *counts
            .entry(permute_with_magic(score, &magic.to_le_bytes()).unwrap())
            .or_default() += 1;
    }
    assert_eq!(counts.len(), 6);
    let expected = 1000.0;
    let chi: f64 = counts
        .values()
        .map(|&n| (n as f64 - expected).powi(2) / expected)
        .sum();
    assert!(chi < 20.52, "chi-square {chi} too large for 5 degrees of freedom");
}

#[test]
fn magic_values_rarely_repeat_orders() {
    // 200 draws over 120 orders: a healthy spread covers most of them.
    let score = [("A", 0), ("B", 1), ("C", 2), ("D", 3), ("E", 4)];
    let distinct: std::collections::HashSet<Vec<String>> = (0u64..200)
        .map(|magic| permute_with_magic(score, &magic.to_le_bytes()).unwrap())
        .collect();
    assert!(distinct.len() >= 80, "only {} distinct orders", distinct.len());
}
