//! Batched random selection.
//!
//! A batch draws values one at a time from a pool. With replacement the pool
//! is the list itself and draws are independent. Without replacement the
//! pool is a private clone, with duplicate values merged, and each draw
//! takes weight out of it:
//!
//! - [`Removal::Unit`] takes one unit of weight, treating an item of weight
//!   `n` as `n` separate replicates,
//! - [`Removal::Entire`] takes the whole item, so no value repeats.
//!
//! Batches are lazy. Pulling a value draws it; a partially consumed batch
//! never does more work than it yielded.

use std::borrow::Cow;
use std::iter::FusedIterator;

use rand::Rng;

use crate::error::{Error, Result};
use crate::item::WeightedItem;
use crate::list::WeightedList;

/// How much of a selected item to take out of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// One unit of weight; the item goes once its weight would reach zero.
    Unit,
    /// The whole item.
    Entire,
}

/// Options for [`WeightedList::selects`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectOptions {
    /// Draw independently, leaving weights untouched.
    pub replace: bool,
    /// Never yield the same value twice. Takes precedence over `replace`.
    pub unique: bool,
}

impl SelectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// What each draw takes out of the pool, or `None` when drawing with
    /// replacement.
    pub fn removal(&self) -> Option<Removal> {
        if self.unique {
            Some(Removal::Entire)
        } else if self.replace {
            None
        } else {
            Some(Removal::Unit)
        }
    }
}

/// A lazy batch of random draws, see [`WeightedList::selects`].
///
/// Yields `Err(Error::Exhausted)` once the pool has no weight left, then
/// stops.
pub struct Selects<'a, 'r, V: Clone, R: ?Sized> {
    pool: Cow<'a, WeightedList<V>>,
    removal: Option<Removal>,
    requested: usize,
    drawn: usize,
    rng: &'r mut R,
}

impl<'a, 'r, V, R> Selects<'a, 'r, V, R>
where
    V: Clone + PartialEq,
    R: Rng + ?Sized,
{
    pub(crate) fn new(
        list: &'a WeightedList<V>,
        count: usize,
        options: SelectOptions,
        rng: &'r mut R,
    ) -> Self {
        let removal = options.removal();
        let pool = match removal {
            None => Cow::Borrowed(list),
            Some(_) => Cow::Owned(list.merged_duplicates()),
        };
        Selects {
            pool,
            removal,
            requested: count,
            drawn: 0,
            rng,
        }
    }

    /// Number of values drawn so far.
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    /// What is left to draw from.
    pub fn pool(&self) -> &WeightedList<V> {
        &self.pool
    }

    fn draw(&mut self) -> Result<V> {
        if self.pool.total() <= 0.0 {
            return Err(Error::Exhausted {
                drawn: self.drawn,
                requested: self.requested,
            });
        }
        match self.removal {
            None => self.pool.select(&mut *self.rng).cloned(),
            Some(removal) => self
                .pool
                .to_mut()
                .select_removing(removal, &mut *self.rng)
                .map(WeightedItem::into_value),
        }
    }
}

impl<V, R> Iterator for Selects<'_, '_, V, R>
where
    V: Clone + PartialEq,
    R: Rng + ?Sized,
{
    type Item = Result<V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.drawn >= self.requested {
            return None;
        }

        let drawn = self.draw();
        match drawn {
            Ok(_) => self.drawn += 1,
            Err(_) => self.requested = self.drawn,
        }
        Some(drawn)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.requested - self.drawn))
    }
}

impl<V, R> FusedIterator for Selects<'_, '_, V, R>
where
    V: Clone + PartialEq,
    R: Rng + ?Sized,
{
}
