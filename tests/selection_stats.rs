//! Statistical checks on random selection.
//!
//! Every test uses a fixed seed, and the tolerances sit several standard
//! deviations out, so these are deterministic.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use weighted_list::{FrozenWeightedList, SelectOptions, WeightedList};

const TRIALS: usize = 100_000;
const TOLERANCE: f64 = 0.01;

fn frequencies<'a>(values: impl Iterator<Item = &'a str>) -> FxHashMap<&'a str, f64> {
    let mut counts: FxHashMap<&str, f64> = FxHashMap::default();
    for value in values {
        *counts.entry(value).or_insert(0.0) += 1.0;
    }
    for count in counts.values_mut() {
        *count /= TRIALS as f64;
    }
    counts
}

fn assert_close(observed: &FxHashMap<&str, f64>, expected: &[(&str, f64)]) {
    for &(value, share) in expected {
        let got = observed.get(value).copied().unwrap_or(0.0);
        assert!(
            (got - share).abs() < TOLERANCE,
            "`{value}`: observed {got:.4}, expected {share:.4}"
        );
    }
}

#[test]
fn select_converges_to_weight_ratios() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let list = WeightedList::from_pairs([(10, "sup"), (5, "nova"), (1, "shard")]).unwrap();

    let observed = frequencies((0..TRIALS).map(|_| *list.select(&mut rng).unwrap()));
    assert_close(&observed, &[("sup", 10.0 / 16.0), ("nova", 5.0 / 16.0), ("shard", 1.0 / 16.0)]);
}

#[test]
fn selects_with_replacement_converges() {
    let mut rng = StdRng::seed_from_u64(0xbeef);
    let list = WeightedList::from_pairs([(10, "sup"), (5, "nova"), (1, "shard")]).unwrap();

    let drawn: Vec<&str> = list
        .selects(TRIALS, SelectOptions::new().replace(true), &mut rng)
        .collect::<Result<_, _>>()
        .unwrap();
    let observed = frequencies(drawn.into_iter());
    assert_close(&observed, &[("sup", 10.0 / 16.0), ("nova", 5.0 / 16.0), ("shard", 1.0 / 16.0)]);
}

#[test]
fn fractional_totals_keep_proportions() {
    let mut rng = StdRng::seed_from_u64(0xf00d);
    let list = WeightedList::from_pairs([(10, "sup"), (5, "nova"), (1, "shard")])
        .unwrap()
        .normalised()
        .unwrap();

    let observed = frequencies((0..TRIALS).map(|_| *list.select(&mut rng).unwrap()));
    assert_close(&observed, &[("sup", 10.0 / 16.0), ("nova", 5.0 / 16.0), ("shard", 1.0 / 16.0)]);
}

#[test]
fn frozen_sample_converges() {
    let mut rng = StdRng::seed_from_u64(0xcafe);
    let list = FrozenWeightedList::from_pairs([(2, "sup"), (3, "nova"), (5, "shard")]).unwrap();

    let observed = frequencies(list.sample(TRIALS, &mut rng).unwrap().copied());
    assert_close(&observed, &[("sup", 0.2), ("nova", 0.3), ("shard", 0.5)]);
}

#[test]
fn shuffle_spreads_weights_evenly() {
    let mut rng = StdRng::seed_from_u64(0xd1ce);
    let list = WeightedList::from_pairs([(2, "sup"), (3, "nova"), (5, "shard")]).unwrap();

    let heaviest = (0..TRIALS).map(|_| {
        let shuffled = list.shuffled(&mut rng);
        shuffled
            .iter()
            .find(|item| item.weight() == 5.0)
            .map(|item| *item.value())
            .unwrap()
    });
    let observed = frequencies(heaviest);
    assert_close(&observed, &[("sup", 1.0 / 3.0), ("nova", 1.0 / 3.0), ("shard", 1.0 / 3.0)]);
}
