//! Item-like inputs and their sanitisation into [`WeightedItem`]s.
//!
//! Anywhere a list accepts "something that becomes an item" it takes an
//! `impl Into<Entry<V>>`:
//!
//! - a [`WeightedItem`] passes through unchanged,
//! - a `(weight, value)` tuple becomes an item with that weight,
//! - [`Entry::value`] wraps a bare value with a weight of 1,
//! - [`Entry::keyed`] takes a mapping entry, `value` first.
//!
//! Tuples put the weight first while items name the value first. Callers
//! write weight-first literals like `(2, "sup")`, so the tuple order is kept
//! even though it mirrors the field order.

use crate::error::Result;
use crate::item::WeightedItem;

/// Anything that can be sanitised into a [`WeightedItem`].
#[derive(Debug, Clone, PartialEq)]
pub enum Entry<V> {
    /// An existing item, kept as is.
    Item(WeightedItem<V>),
    /// A bare value, weighted 1.
    Value(V),
    /// A `(weight, value)` pair.
    Pair(f64, V),
}

impl<V> Entry<V> {
    pub fn value(value: V) -> Self {
        Entry::Value(value)
    }

    /// A `value -> weight` mapping entry.
    pub fn keyed(value: V, weight: impl Into<f64>) -> Self {
        Entry::Pair(weight.into(), value)
    }

    /// Turn this entry into a validated item.
    pub fn sanitise(self) -> Result<WeightedItem<V>> {
        match self {
            Entry::Item(item) => Ok(item),
            Entry::Value(value) => Ok(WeightedItem::unit(value)),
            Entry::Pair(weight, value) => WeightedItem::new(value, weight),
        }
    }
}

impl<V> From<WeightedItem<V>> for Entry<V> {
    fn from(item: WeightedItem<V>) -> Self {
        Entry::Item(item)
    }
}

impl<V, W: Into<f64>> From<(W, V)> for Entry<V> {
    fn from((weight, value): (W, V)) -> Self {
        Entry::Pair(weight.into(), value)
    }
}
