//! The mutable weighted list.
//!
//! # Indexing
//!
//! Every weighted-position operation (`get`, `set`, `remove`, `insert`,
//! `pop`, `drop`, `take_by_at`) goes through the same linear resolver. Sequence
//! access by ordinal position is available through [`WeightedList::items`].
//!
//! # Naming
//!
//! Mutators act in place and return `&mut Self` (or `Result<&mut Self>`) so
//! calls chain. Where an operation also has a form that leaves the list
//! alone, that form works on a full clone and is named in the past tense:
//! `merge`/`merged`, `normalise`/`normalised`, `shuffle`/`shuffled`,
//! `sort`/`sorted`, `reverse`/`reversed`.
//!
//! # Length
//!
//! [`len`](WeightedList::len) counts items and [`total`](WeightedList::total)
//! sums weights. Neither stands in for the other.
//!
//! A list is a plain owned value with no interior mutability. Sharing one
//! between threads for mutation needs external synchronisation.

use std::fmt;
use std::hash::Hash;
use std::ops::{Add, BitOr, Index, IndexMut, RangeBounds};

use rand::Rng;
use rand::seq::SliceRandom;
use rustc_hash::FxHashMap;

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::index;
use crate::item::{WeightedItem, validate_weight};
use crate::select::{Removal, SelectOptions, Selects};

/// An ordered list of [`WeightedItem`]s addressed by cumulative weight.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedList<V> {
    items: Vec<WeightedItem<V>>,
}

impl<V> WeightedList<V> {
    pub fn new() -> Self {
        WeightedList { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        WeightedList {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Build a list where every value has a weight of 1.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        values.into_iter().map(WeightedItem::unit).collect()
    }

    /// Build a list from `(weight, value)` pairs.
    pub fn from_pairs<I, W>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (W, V)>,
        W: Into<f64>,
    {
        Self::from_entries(pairs)
    }

    /// Build a list from `value -> weight` mapping entries.
    pub fn from_map<I, W>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (V, W)>,
        W: Into<f64>,
    {
        let mut list = Self::new();
        list.extend_map(entries)?;
        Ok(list)
    }

    /// Build a list from any mix of item-like inputs.
    pub fn from_entries<I, E>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry<V>>,
    {
        entries
            .into_iter()
            .map(|entry| entry.into().sanitise())
            .collect::<Result<Vec<_>>>()
            .map(|items| WeightedList { items })
    }

    /// Number of items, regardless of weight.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all item weights, recomputed on every call.
    pub fn total(&self) -> f64 {
        index::total(&self.items)
    }

    /// True when no item carries any weight (including when empty).
    pub fn is_zero(&self) -> bool {
        self.items.iter().all(|item| item.weight() == 0.0)
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

    /// `(weight, value)` pairs in list order.
    pub fn to_pairs(&self) -> Vec<(f64, &V)> {
        self.items.iter().map(|item| (item.weight(), item.value())).collect()
    }

    /// Unweighted position of the item owning weighted `index`.
    pub fn position(&self, index: i64) -> Result<usize> {
        index::resolve(&self.items, index as f64)
    }

    pub fn get(&self, index: i64) -> Result<&WeightedItem<V>> {
        let position = self.position(index)?;
        Ok(&self.items[position])
    }

    pub fn get_mut(&mut self, index: i64) -> Result<&mut WeightedItem<V>> {
        let position = self.position(index)?;
        Ok(&mut self.items[position])
    }

    /// Range indexing over weighted coordinates has no meaningful result
    /// type, so it always fails.
    pub fn slice<R: RangeBounds<i64>>(&self, _range: R) -> Result<&[WeightedItem<V>]> {
        Err(Error::Unsupported("slice indexing"))
    }

    // =========================================================================
    // List mutation
    // =========================================================================

    pub fn append<E: Into<Entry<V>>>(&mut self, entry: E) -> Result<&mut Self> {
        self.items.push(entry.into().sanitise()?);
        Ok(self)
    }

    /// Append `value` with a weight of 1.
    pub fn push_value(&mut self, value: V) -> &mut Self {
        self.items.push(WeightedItem::unit(value));
        self
    }

    /// Append every entry in order. Entries before a failing one stay
    /// appended.
    pub fn extend_entries<I, E>(&mut self, entries: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry<V>>,
    {
        for entry in entries {
            self.items.push(entry.into().sanitise()?);
        }
        Ok(self)
    }

    /// Append `value -> weight` mapping entries in order.
    pub fn extend_map<I, W>(&mut self, entries: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (V, W)>,
        W: Into<f64>,
    {
        self.extend_entries(entries.into_iter().map(|(value, weight)| Entry::keyed(value, weight)))
    }

    /// Insert before the item owning weighted `index`.
    ///
    /// An `index` equal to the total weight addresses the slot after the last
    /// item, so it appends. That is also how to insert into an empty list.
    pub fn insert<E: Into<Entry<V>>>(&mut self, index: i64, entry: E) -> Result<&mut Self> {
        let position = if index >= 0 && index as f64 == self.total() {
            self.items.len()
        } else {
            self.position(index)?
        };
        self.items.insert(position, entry.into().sanitise()?);
        Ok(self)
    }

    /// Replace the item owning weighted `index`.
    pub fn set<E: Into<Entry<V>>>(&mut self, index: i64, entry: E) -> Result<&mut Self> {
        let position = self.position(index)?;
        self.items[position] = entry.into().sanitise()?;
        Ok(self)
    }

    /// Delete the item owning weighted `index`.
    pub fn remove(&mut self, index: i64) -> Result<&mut Self> {
        let position = self.position(index)?;
        self.items.remove(position);
        Ok(self)
    }

    /// Remove and return the item owning weighted `index`. Pass `-1` for the
    /// last item with any weight.
    pub fn pop(&mut self, index: i64) -> Result<WeightedItem<V>> {
        let position = self.position(index)?;
        Ok(self.items.remove(position))
    }

    pub fn pop_last(&mut self) -> Result<WeightedItem<V>> {
        self.pop(-1)
    }

    pub fn clear(&mut self) -> &mut Self {
        self.items.clear();
        self
    }

    // =========================================================================
    // Queries and transforms
    // =========================================================================

    pub fn find<P>(&self, mut predicate: P) -> impl Iterator<Item = &WeightedItem<V>>
    where
        P: FnMut(&WeightedItem<V>) -> bool,
    {
        self.items.iter().filter(move |item| predicate(*item))
    }

    /// Keep only the items matching `predicate`.
    pub fn retain<P>(&mut self, predicate: P) -> &mut Self
    where
        P: FnMut(&WeightedItem<V>) -> bool,
    {
        self.items.retain(predicate);
        self
    }

    /// Remove every item without positive weight.
    pub fn clean(&mut self) -> &mut Self {
        self.retain(|item| item.weight() > 0.0)
    }

    /// Keep only the first `limit` units of weight. An item straddling the
    /// limit keeps the part in front of it; everything after is removed.
    pub fn truncate(&mut self, limit: impl Into<f64>) -> Result<&mut Self> {
        let limit = validate_weight(limit.into())?;
        let mut cumulative = 0.0;
        let mut keep = 0;
        for item in &mut self.items {
            if cumulative >= limit {
                break;
            }
            let weight = item.weight();
            if cumulative + weight > limit {
                item.set_weight_unchecked(limit - cumulative);
            }
            cumulative = index::accumulate(cumulative, weight);
            keep += 1;
        }
        self.items.truncate(keep);
        Ok(self)
    }

    /// Give every item the same weight.
    pub fn set_all_weights(&mut self, weight: impl Into<f64>) -> Result<&mut Self> {
        let weight = validate_weight(weight.into())?;
        for item in &mut self.items {
            item.set_weight_unchecked(weight);
        }
        Ok(self)
    }

    pub fn zero_all_weights(&mut self) -> &mut Self {
        for item in &mut self.items {
            item.set_weight_unchecked(0.0);
        }
        self
    }

    /// Stable sort by ascending weight.
    pub fn sort(&mut self) -> &mut Self {
        self.items.sort_by(|a, b| a.weight().total_cmp(&b.weight()));
        self
    }

    pub fn reverse(&mut self) -> &mut Self {
        self.items.reverse();
        self
    }

    /// Scale weights so they sum to 1.
    pub fn normalise(&mut self) -> Result<&mut Self> {
        self.normalise_to(1.0)
    }

    /// Scale weights so they sum to `factor`.
    ///
    /// An empty list is left alone. A non-empty list with zero total weight
    /// has nothing to scale against and fails with [`Error::ZeroTotal`].
    pub fn normalise_to(&mut self, factor: impl Into<f64>) -> Result<&mut Self> {
        let factor = validate_weight(factor.into())?;
        if self.items.is_empty() {
            return Ok(self);
        }

        // Scale by the heaviest item first so the sum cannot overflow.
        let peak = self.weights().fold(0.0, f64::max);
        if peak == 0.0 {
            return Err(Error::ZeroTotal);
        }
        let scaled: f64 = self.weights().map(|weight| weight / peak).sum();
        for item in &mut self.items {
            item.set_weight_unchecked(item.weight() / peak / scaled * factor);
        }
        Ok(self)
    }

    /// Randomly reassign weights among the values. Values keep their order;
    /// the multiset of weights is unchanged.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &mut Self {
        let mut weights: Vec<f64> = self.weights().collect();
        weights.shuffle(rng);
        for (item, weight) in self.items.iter_mut().zip(weights) {
            item.set_weight_unchecked(weight);
        }
        self
    }

    /// Each value repeated as many times as its weight, rounding half to
    /// even.
    pub fn as_raw(&self) -> impl Iterator<Item = &V> {
        self.as_raw_with(|weight| weight.round_ties_even() as usize)
    }

    /// Each value repeated `rounding(weight)` times.
    pub fn as_raw_with<F>(&self, rounding: F) -> impl Iterator<Item = &V>
    where
        F: Fn(f64) -> usize,
    {
        self.items
            .iter()
            .flat_map(move |item| std::iter::repeat_n(item.value(), rounding(item.weight())))
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Pick a value at random, with probability proportional to its weight.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&V> {
        self.select_item(rng).map(WeightedItem::value)
    }

    pub fn select_item<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&WeightedItem<V>> {
        let position = self.select_position(rng)?;
        Ok(&self.items[position])
    }

    fn select_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize> {
        let total = self.total();
        if total <= 0.0 {
            return Err(Error::IndexOutOfRange { index: 0.0, total });
        }
        index::resolve(&self.items, rng.gen_range(0.0..total))
    }
}

impl<V: Clone> WeightedList<V> {
    /// Take `amount` units of weight from the item owning weighted `index`.
    ///
    /// An item heavier than `amount` loses it and stays; a copy with the
    /// reduced weight is returned. Anything else is removed and returned with
    /// weight 0.
    pub fn take_by_at(&mut self, amount: impl Into<f64>, index: i64) -> Result<WeightedItem<V>> {
        let amount = validate_weight(amount.into())?;
        let position = self.position(index)?;
        Ok(self.take_at(position, amount))
    }

    /// Take one unit of weight from the item owning weighted `index`.
    pub fn take_one_at(&mut self, index: i64) -> Result<WeightedItem<V>> {
        self.take_by_at(1.0, index)
    }

    /// Unit decrement, the same as [`take_one_at`](Self::take_one_at): an
    /// item heavier than 1 loses 1, anything else is removed and reported
    /// with weight 0.
    pub fn drop(&mut self, index: i64) -> Result<WeightedItem<V>> {
        self.take_one_at(index)
    }

    fn take_at(&mut self, position: usize, amount: f64) -> WeightedItem<V> {
        let item = &mut self.items[position];
        if item.weight() > amount {
            item.set_weight_unchecked(item.weight() - amount);
            return item.clone();
        }

        let mut removed = self.items.remove(position);
        removed.set_weight_unchecked(0.0);
        removed
    }

    /// Pick an item at random and take it out of the list, either one unit
    /// of weight or the whole item.
    pub fn select_removing<R: Rng + ?Sized>(
        &mut self,
        removal: Removal,
        rng: &mut R,
    ) -> Result<WeightedItem<V>> {
        let position = self.select_position(rng)?;
        Ok(match removal {
            Removal::Unit => self.take_at(position, 1.0),
            Removal::Entire => self.items.remove(position),
        })
    }

    pub fn normalised(&self) -> Result<Self> {
        let mut list = self.clone();
        list.normalise()?;
        Ok(list)
    }

    pub fn normalised_to(&self, factor: impl Into<f64>) -> Result<Self> {
        let mut list = self.clone();
        list.normalise_to(factor)?;
        Ok(list)
    }

    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut list = self.clone();
        list.shuffle(rng);
        list
    }

    pub fn sorted(&self) -> Self {
        let mut list = self.clone();
        list.sort();
        list
    }

    pub fn reversed(&self) -> Self {
        let mut list = self.clone();
        list.reverse();
        list
    }

    /// This list followed by `other`.
    pub fn concat(&self, other: &Self) -> Self {
        let mut list = self.clone();
        list.items.extend_from_slice(&other.items);
        list
    }

    /// This list's items repeated `times` times over.
    pub fn repeat(&self, times: usize) -> Self {
        self.items
            .iter()
            .cycle()
            .take(self.items.len() * times)
            .cloned()
            .collect()
    }
}

impl<V: PartialEq> WeightedList<V> {
    /// Build a list from expanded values, weighting each distinct value by
    /// how often it occurs. The inverse of [`as_raw`](Self::as_raw).
    pub fn from_raw<I>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        let mut list = Self::new();
        for value in values {
            list.merge_item(WeightedItem::unit(value));
        }
        list
    }

    /// Merge entries in: an entry whose value is already present adds its
    /// weight to the first such item, anything else is appended.
    pub fn merge<I, E>(&mut self, other: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry<V>>,
    {
        for entry in other {
            self.merge_item(entry.into().sanitise()?);
        }
        Ok(self)
    }

    pub fn merge_item(&mut self, item: WeightedItem<V>) -> &mut Self {
        match self.items.iter_mut().find(|each| each.value() == item.value()) {
            Some(existing) => existing.add_weight(item.weight()),
            None => self.items.push(item),
        }
        self
    }

    /// Collapse items with equal values into the first of them.
    pub fn merge_duplicates(&mut self) -> &mut Self {
        let items = std::mem::take(&mut self.items);
        for item in items {
            self.merge_item(item);
        }
        self
    }

    /// Total weight of the items holding `value`.
    pub fn count(&self, value: &V) -> f64 {
        self.items
            .iter()
            .filter(|item| item.value() == value)
            .fold(0.0, |sum, item| sum + item.weight())
    }

    /// Whether an item equal in value and weight is present.
    pub fn contains(&self, item: &WeightedItem<V>) -> bool {
        self.items.contains(item)
    }
}

impl<V: Clone + PartialEq> WeightedList<V> {
    pub fn merged<I, E>(&self, other: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry<V>>,
    {
        let mut list = self.clone();
        list.merge(other)?;
        Ok(list)
    }

    pub fn merged_duplicates(&self) -> Self {
        let mut list = self.clone();
        list.merge_duplicates();
        list
    }

    /// Lazily draw `count` values. See [`SelectOptions`] for how draws
    /// affect the pool; the list itself is never modified.
    pub fn selects<'a, 'r, R: Rng + ?Sized>(
        &'a self,
        count: usize,
        options: SelectOptions,
        rng: &'r mut R,
    ) -> Selects<'a, 'r, V, R> {
        Selects::new(self, count, options, rng)
    }
}

impl<V: Clone + Eq + Hash> WeightedList<V> {
    /// Map each distinct value to its summed weight.
    pub fn as_dict(&self) -> FxHashMap<V, f64> {
        let mut dict = FxHashMap::default();
        for item in &self.items {
            *dict.entry(item.value().clone()).or_insert(0.0) += item.weight();
        }
        dict
    }
}

impl<V> Default for WeightedList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<WeightedItem<V>> for WeightedList<V> {
    fn from_iter<I: IntoIterator<Item = WeightedItem<V>>>(iter: I) -> Self {
        WeightedList {
            items: iter.into_iter().collect(),
        }
    }
}

impl<V> Extend<WeightedItem<V>> for WeightedList<V> {
    fn extend<I: IntoIterator<Item = WeightedItem<V>>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<V> IntoIterator for WeightedList<V> {
    type Item = WeightedItem<V>;
    type IntoIter = std::vec::IntoIter<WeightedItem<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a WeightedList<V> {
    type Item = &'a WeightedItem<V>;
    type IntoIter = std::slice::Iter<'a, WeightedItem<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Panics when `index` is out of range, like slice indexing.
impl<V> Index<i64> for WeightedList<V> {
    type Output = WeightedItem<V>;

    fn index(&self, index: i64) -> &Self::Output {
        match self.get(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<V> IndexMut<i64> for WeightedList<V> {
    fn index_mut(&mut self, index: i64) -> &mut Self::Output {
        match self.get_mut(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Concatenation.
impl<V> Add for WeightedList<V> {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self.items.extend(other.items);
        self
    }
}

/// Merge-as-union.
impl<V: PartialEq> BitOr for WeightedList<V> {
    type Output = Self;

    fn bitor(mut self, other: Self) -> Self {
        for item in other.items {
            self.merge_item(item);
        }
        self
    }
}

impl<V: fmt::Display> fmt::Display for WeightedList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeightedList(")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, ")")
    }
}
