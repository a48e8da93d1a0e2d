//! Weighted index resolution.
//!
//! A weighted index addresses a unit of cumulative weight rather than an
//! item. With weights `[2, 3, 5]`:
//!
//! ```text
//! index:   0 1 | 2 3 4 | 5 6 7 8 9
//! item:    sup | nova  | shard
//! reverse: -10 -9 | -8 -7 -6 | -5 -4 -3 -2 -1
//! ```
//!
//! Forward indices walk from the front, adding each weight to a running
//! total; the first item that pushes the total strictly past the index owns
//! it. A negative index `i` is first mapped to `total + i` and then walked
//! forward the same way, so both directions share one accumulation and
//! agree with the list total to the last bit. Items with a non-positive weight
//! own no range and are skipped, with a warning.
//!
//! Running sums saturate at `f64::MAX`, like
//! [`WeightedItem`] weight additions, so a list of finite weights always
//! has a finite total.
//!
//! This is a linear walk. Lists are expected to be small and append-heavy,
//! and a walk keeps every mutation free of index maintenance.
//! [`FrozenWeightedList`](crate::FrozenWeightedList) trades that for prefix
//! sums and a binary search since it never changes.

use crate::error::{Error, Result};
use crate::item::WeightedItem;

/// Find the unweighted position of the item owning weighted coordinate `at`.
pub(crate) fn resolve<V>(items: &[WeightedItem<V>], at: f64) -> Result<usize> {
    let total = total(items);
    let coordinate = if at < 0.0 { total + at } else { at };

    let found = if coordinate < 0.0 {
        None
    } else {
        walk(items, coordinate)
    };
    found.ok_or(Error::IndexOutOfRange { index: at, total })
}

/// Sum of all weights, saturating at `f64::MAX`.
pub(crate) fn total<V>(items: &[WeightedItem<V>]) -> f64 {
    items.iter().fold(0.0, |sum, item| accumulate(sum, item.weight()))
}

/// One step of a running weight sum.
pub(crate) fn accumulate(sum: f64, weight: f64) -> f64 {
    (sum + weight).min(f64::MAX)
}

fn walk<V>(items: &[WeightedItem<V>], at: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    for (position, item) in items.iter().enumerate() {
        if !owns_range(position, item) {
            continue;
        }
        cumulative = accumulate(cumulative, item.weight());
        if cumulative > at {
            return Some(position);
        }
    }
    None
}

fn owns_range<V>(position: usize, item: &WeightedItem<V>) -> bool {
    if item.weight() > 0.0 {
        return true;
    }
    tracing::warn!(position, weight = item.weight(), "skipping item without positive weight");
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(weights: &[f64]) -> Vec<WeightedItem<usize>> {
        weights
            .iter()
            .enumerate()
            .map(|(i, &w)| WeightedItem::new(i, w).unwrap())
            .collect()
    }

    #[test]
    fn forward_boundaries() {
        let list = items(&[2.0, 3.0, 5.0]);
        let owners: Vec<_> = (0..10).map(|i| resolve(&list, i as f64).unwrap()).collect();
        assert_eq!(owners, vec![0, 0, 1, 1, 1, 2, 2, 2, 2, 2]);
        assert!(resolve(&list, 10.0).is_err());
    }

    #[test]
    fn reverse_boundaries() {
        let list = items(&[2.0, 3.0, 5.0]);
        let owners: Vec<_> = (1..=10).map(|i| resolve(&list, -(i as f64)).unwrap()).collect();
        assert_eq!(owners, vec![2, 2, 2, 2, 2, 1, 1, 1, 0, 0]);
        assert!(resolve(&list, -11.0).is_err());
    }

    #[test]
    fn fractional_coordinates() {
        let list = items(&[0.2, 0.3, 0.5]);
        assert_eq!(resolve(&list, 0.0).unwrap(), 0);
        assert_eq!(resolve(&list, 0.19).unwrap(), 0);
        assert_eq!(resolve(&list, 0.25).unwrap(), 1);
        assert_eq!(resolve(&list, 0.99).unwrap(), 2);
    }

    #[test]
    fn zero_weights_are_skipped_but_counted_in_position() {
        let list = items(&[0.0, 2.0, 0.0, 1.0, 0.0]);
        assert_eq!(resolve(&list, 0.0).unwrap(), 1);
        assert_eq!(resolve(&list, 1.0).unwrap(), 1);
        assert_eq!(resolve(&list, 2.0).unwrap(), 3);
        assert_eq!(resolve(&list, -1.0).unwrap(), 3);
        assert_eq!(resolve(&list, -3.0).unwrap(), 1);
    }

    #[test]
    fn empty_list_is_out_of_range() {
        let list = items(&[]);
        assert_eq!(
            resolve(&list, 0.0),
            Err(Error::IndexOutOfRange { index: 0.0, total: 0.0 })
        );
    }

    #[test]
    fn reverse_uses_the_forward_total() {
        let list = items(&[0.1, 0.2, 0.7]);
        assert_eq!(total(&list), 1.0);
        assert_eq!(resolve(&list, -1.0).unwrap(), 0);

        let list = items(&[0.7, 0.2, 0.1]);
        assert!(total(&list) < 1.0);
        assert_eq!(
            resolve(&list, -1.0),
            Err(Error::IndexOutOfRange { index: -1.0, total: total(&list) })
        );
    }

    #[test]
    fn huge_weights_saturate() {
        let list = items(&[f64::MAX, f64::MAX]);
        assert_eq!(total(&list), f64::MAX);
        assert_eq!(resolve(&list, 0.0).unwrap(), 0);
        assert_eq!(resolve(&list, -f64::MAX).unwrap(), 0);
        assert!(resolve(&list, f64::MAX).is_err());
    }

    #[test]
    fn all_zero_list_is_out_of_range() {
        let list = items(&[0.0, 0.0]);
        assert!(resolve(&list, 0.0).is_err());
        assert!(resolve(&list, -1.0).is_err());
    }
}
