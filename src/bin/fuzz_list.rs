//! AFL fuzz harness for WeightedList
//!
//! Replays byte-decoded mutations against a list and checks after each one:
//! 1. Total: the total weight equals the sum of the item weights
//! 2. Resolution: every weighted index resolves to the same position in the
//!    list and in a frozen copy of it
//! 3. Range: indices just outside `[-total, total)` fail on both
//!
//! Weights are small integers so cumulative sums are exact and the two
//! resolvers must agree bit for bit.

use afl::fuzz;
use rand::SeedableRng;
use rand::rngs::StdRng;
use weighted_list::{FrozenWeightedList, Removal, WeightedList};

/// Operation types the fuzzer can generate
#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    /// Append value with weight (zero allowed)
    Append { value: u8, weight: u8 },
    /// Insert before the item owning a weighted index
    Insert { index_frac: u8, weight: u8 },
    /// Pop the item owning a weighted index
    Pop { index_frac: u8 },
    /// Take one unit from the item owning a weighted index
    Drop { index_frac: u8 },
    /// Select and remove, seeded
    Select { seed: u8, entire: bool },
    MergeDuplicates,
    Clean,
    Shuffle { seed: u8 },
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        let (&tag, rest) = bytes.split_first()?;

        match tag % 8 {
            0 if rest.len() >= 2 => Some((
                FuzzOp::Append { value: rest[0] % 16, weight: rest[1] % 8 },
                &rest[2..],
            )),
            1 if rest.len() >= 2 => Some((
                FuzzOp::Insert { index_frac: rest[0], weight: rest[1] % 8 },
                &rest[2..],
            )),
            2 if !rest.is_empty() => Some((FuzzOp::Pop { index_frac: rest[0] }, &rest[1..])),
            3 if !rest.is_empty() => Some((FuzzOp::Drop { index_frac: rest[0] }, &rest[1..])),
            4 if !rest.is_empty() => Some((
                FuzzOp::Select { seed: rest[0], entire: rest[0] % 2 == 0 },
                &rest[1..],
            )),
            5 => Some((FuzzOp::MergeDuplicates, rest)),
            6 => Some((FuzzOp::Clean, rest)),
            7 if !rest.is_empty() => Some((FuzzOp::Shuffle { seed: rest[0] }, &rest[1..])),
            _ => None,
        }
    }
}

/// Map a byte onto `[-total, total]`, landing just outside the range at the
/// extremes.
fn weighted_index(frac: u8, total: f64) -> i64 {
    let span = total as i64;
    (frac as i64 * (2 * span + 1)) / 255 - span
}

fn check(list: &WeightedList<u8>) {
    let summed: f64 = list.weights().fold(0.0, |sum, weight| sum + weight);
    assert_eq!(list.total(), summed, "Total mismatch");

    let frozen = FrozenWeightedList::from(list.clone());
    assert_eq!(frozen.total(), list.total(), "Frozen total mismatch");

    let span = list.total() as i64;
    for index in -span - 1..=span {
        assert_eq!(
            list.position(index).ok(),
            frozen.position(index).ok(),
            "Resolution mismatch at index {}",
            index
        );
    }
    assert!(list.position(span).is_err());
    assert!(list.position(-span - 1).is_err());
}

fn main() {
    fuzz!(|data: &[u8]| {
        let mut list: WeightedList<u8> = WeightedList::new();
        let mut remaining = data;

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;

            match op {
                FuzzOp::Append { value, weight } => {
                    let _ = list.append((weight, value));
                }
                FuzzOp::Insert { index_frac, weight } => {
                    let index = weighted_index(index_frac, list.total());
                    let _ = list.insert(index, (weight, index_frac));
                }
                FuzzOp::Pop { index_frac } => {
                    let index = weighted_index(index_frac, list.total());
                    let before = list.len();
                    if list.pop(index).is_ok() {
                        assert_eq!(list.len(), before - 1, "Pop did not remove");
                    }
                }
                FuzzOp::Drop { index_frac } => {
                    let index = weighted_index(index_frac, list.total());
                    let before = list.total();
                    if list.drop(index).is_ok() {
                        assert!(list.total() < before, "Drop did not reduce weight");
                    }
                }
                FuzzOp::Select { seed, entire } => {
                    let mut rng = StdRng::seed_from_u64(seed as u64);
                    let removal = if entire { Removal::Entire } else { Removal::Unit };
                    let _ = list.select_removing(removal, &mut rng);
                }
                FuzzOp::MergeDuplicates => {
                    let total = list.total();
                    list.merge_duplicates();
                    assert_eq!(list.total(), total, "Merge changed total");
                }
                FuzzOp::Clean => {
                    list.clean();
                    assert!(list.weights().all(|weight| weight > 0.0));
                }
                FuzzOp::Shuffle { seed } => {
                    let mut rng = StdRng::seed_from_u64(seed as u64);
                    let total = list.total();
                    list.shuffle(&mut rng);
                    assert_eq!(list.len(), list.values().count());
                    assert_eq!(list.total(), total, "Shuffle changed total");
                }
            }

            check(&list);
        }
    });
}
