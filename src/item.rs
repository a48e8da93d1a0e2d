//! A single (value, weight) pair.

use std::fmt;

use crate::error::{Error, Result};

/// Check that `weight` is a finite, non-negative number.
pub(crate) fn validate_weight(weight: f64) -> Result<f64> {
    if weight.is_nan() {
        return Err(Error::NotANumber);
    }
    if weight.is_infinite() {
        return Err(Error::InfiniteWeight);
    }
    if weight < 0.0 {
        return Err(Error::NegativeWeight(weight));
    }
    Ok(weight)
}

/// An item in a weighted list: an opaque `value` and its `weight`.
///
/// The value is fixed once the item exists. The weight can change, but only
/// through [`WeightedItem::set_weight`], which re-validates it, so an item
/// never holds a NaN, negative, or infinite weight.
///
/// A weight of exactly zero is legal. Such an item is kept in iteration and
/// in [`as_dict`](crate::WeightedList::as_dict), but no weighted index ever
/// resolves to it.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedItem<V> {
    value: V,
    weight: f64,
}

impl<V> WeightedItem<V> {
    /// Create an item, rejecting invalid weights.
    pub fn new(value: V, weight: impl Into<f64>) -> Result<Self> {
        let weight = validate_weight(weight.into())?;
        Ok(WeightedItem { value, weight })
    }

    /// Create an item with a weight of 1.
    pub fn unit(value: V) -> Self {
        WeightedItem { value, weight: 1.0 }
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Replace the weight, rejecting invalid weights.
    pub fn set_weight(&mut self, weight: impl Into<f64>) -> Result<()> {
        self.weight = validate_weight(weight.into())?;
        Ok(())
    }

    pub fn into_value(self) -> V {
        self.value
    }

    /// Split into a `(weight, value)` pair, the literal order used for
    /// construction.
    pub fn into_pair(self) -> (f64, V) {
        (self.weight, self.value)
    }

    /// Callers inside the crate only ever pass weights derived from
    /// already-valid ones (sums, scalings, unit decrements).
    pub(crate) fn set_weight_unchecked(&mut self, weight: f64) {
        debug_assert!(validate_weight(weight).is_ok(), "invalid weight {weight}");
        self.weight = weight;
    }

    /// Add `extra` to the weight, saturating at `f64::MAX` so the sum of two
    /// valid weights stays valid.
    pub(crate) fn add_weight(&mut self, extra: f64) {
        self.weight = crate::index::accumulate(self.weight, extra);
    }
}

impl<V: fmt::Display> fmt::Display for WeightedItem<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.value, self.weight)
    }
}
