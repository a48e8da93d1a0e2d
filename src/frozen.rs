//! Frozen Weighted List
//!
//! An immutable weighted list built once and only ever read. Because it
//! never changes, it keeps the cumulative weight after each item and finds
//! the owner of a weighted index by binary search in O(log n).
//!
//! The boundary rules match [`WeightedList`] exactly:
//!
//! - item `k` owns `[before_k, before_k + weight_k)` where `before_k` is the
//!   summed weight of everything in front of it,
//! - zero-weight items own nothing,
//! - a negative index `i` addresses `total + i`,
//! - running sums saturate at `f64::MAX`.
//!
//! A lookup never visits the items it skips, so the warning for an item
//! without positive weight is logged once, when the list is frozen.
//!
//! Having no mutation at all, a frozen list is `Sync` whenever its values
//! are, and can be shared behind an `Arc` without locking.

use std::ops::Index;

use rand::Rng;

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::index;
use crate::item::WeightedItem;
use crate::list::WeightedList;

#[derive(Debug, Clone, PartialEq)]
pub struct FrozenWeightedList<V> {
    items: Box<[WeightedItem<V>]>,
    /// `cumulative[k]` is the summed weight of items `0..=k`.
    cumulative: Box<[f64]>,
}

impl<V> FrozenWeightedList<V> {
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        WeightedList::from_values(values).into()
    }

    pub fn from_pairs<I, W>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (W, V)>,
        W: Into<f64>,
    {
        WeightedList::from_pairs(pairs).map(Self::from)
    }

    pub fn from_map<I, W>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (V, W)>,
        W: Into<f64>,
    {
        WeightedList::from_map(entries).map(Self::from)
    }

    pub fn from_entries<I, E>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry<V>>,
    {
        WeightedList::from_entries(entries).map(Self::from)
    }

    /// Turn back into a mutable list.
    pub fn thaw(self) -> WeightedList<V> {
        self.items.into_vec().into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn is_zero(&self) -> bool {
        self.total() == 0.0
    }

    pub fn items(&self) -> &[WeightedItem<V>] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeightedItem<V>> {
        self.items.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.items.iter().map(WeightedItem::value)
    }

    pub fn weights(&self) -> impl Iterator<Item = f64> {
        self.items.iter().map(WeightedItem::weight)
    }

    /// Unweighted position of the item owning weighted `index`.
    pub fn position(&self, index: i64) -> Result<usize> {
        self.locate(index as f64).ok_or(Error::IndexOutOfRange {
            index: index as f64,
            total: self.total(),
        })
    }

    pub fn get(&self, index: i64) -> Result<&WeightedItem<V>> {
        let position = self.position(index)?;
        Ok(&self.items[position])
    }

    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&V> {
        self.select_item(rng).map(WeightedItem::value)
    }

    pub fn select_item<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&WeightedItem<V>> {
        let total = self.total();
        if total <= 0.0 {
            return Err(Error::IndexOutOfRange { index: 0.0, total });
        }
        let at = rng.gen_range(0.0..total);
        self.locate(at)
            .map(|position| &self.items[position])
            .ok_or(Error::IndexOutOfRange { index: at, total })
    }

    /// Lazily draw `count` values with replacement.
    pub fn sample<'a, R: Rng + ?Sized>(
        &'a self,
        count: usize,
        rng: &'a mut R,
    ) -> Result<impl Iterator<Item = &'a V>> {
        let total = self.total();
        if total <= 0.0 {
            return Err(Error::IndexOutOfRange { index: 0.0, total });
        }
        Ok((0..count).filter_map(move |_| {
            let at = rng.gen_range(0.0..total);
            self.locate(at).map(|position| self.items[position].value())
        }))
    }

    fn locate(&self, at: f64) -> Option<usize> {
        let total = self.total();
        let at = if at < 0.0 { total + at } else { at };
        if !(0.0..total).contains(&at) {
            return None;
        }

        let position = self.cumulative.partition_point(|&cumulative| cumulative <= at);
        (position < self.items.len()).then_some(position)
    }
}

impl<V> From<WeightedList<V>> for FrozenWeightedList<V> {
    fn from(list: WeightedList<V>) -> Self {
        list.into_iter().collect()
    }
}

impl<V> From<FrozenWeightedList<V>> for WeightedList<V> {
    fn from(frozen: FrozenWeightedList<V>) -> Self {
        frozen.thaw()
    }
}

impl<V> FromIterator<WeightedItem<V>> for FrozenWeightedList<V> {
    fn from_iter<I: IntoIterator<Item = WeightedItem<V>>>(iter: I) -> Self {
        let items: Box<[WeightedItem<V>]> = iter.into_iter().collect();
        let mut running = 0.0;
        let cumulative = items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                if item.weight() <= 0.0 {
                    tracing::warn!(
                        position,
                        weight = item.weight(),
                        "frozen item without positive weight owns no index"
                    );
                }
                running = index::accumulate(running, item.weight());
                running
            })
            .collect();
        FrozenWeightedList { items, cumulative }
    }
}

impl<V> IntoIterator for FrozenWeightedList<V> {
    type Item = WeightedItem<V>;
    type IntoIter = std::vec::IntoIter<WeightedItem<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_vec().into_iter()
    }
}

impl<'a, V> IntoIterator for &'a FrozenWeightedList<V> {
    type Item = &'a WeightedItem<V>;
    type IntoIter = std::slice::Iter<'a, WeightedItem<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<V> Index<i64> for FrozenWeightedList<V> {
    type Output = WeightedItem<V>;

    fn index(&self, index: i64) -> &Self::Output {
        match self.get(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<V> WeightedList<V> {
    /// Freeze into an immutable list with O(log n) lookups.
    pub fn freeze(self) -> FrozenWeightedList<V> {
        self.into()
    }
}
