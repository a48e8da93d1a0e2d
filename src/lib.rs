//! Weighted List - ordered (value, weight) collections for weighted
//! randomisation.
//!
//! A [`WeightedList`] is indexed by cumulative weight rather than by item:
//! index `n` names the `n`th unit of weight. Random selection, unit-by-unit
//! sampling without replacement, merging, and normalisation are all built on
//! that one idea.
//!
//! # Quick Start
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use weighted_list::{SelectOptions, WeightedList};
//!
//! let mut list = WeightedList::from_pairs([(2, "sup"), (3, "nova"), (5, "shard")])?;
//!
//! // Index 4 falls in the [2, 5) range owned by "nova".
//! assert_eq!(list[4].value(), &"nova");
//! assert_eq!(list.len(), 3);
//! assert_eq!(list.total(), 10.0);
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let picked = list.select(&mut rng)?;
//! assert!(["sup", "nova", "shard"].contains(picked));
//!
//! // Drawing every unit of weight without replacement reproduces the
//! // expanded list, in some order.
//! let drawn: Vec<_> = list
//!     .selects(10, SelectOptions::new(), &mut rng)
//!     .collect::<Result<_, _>>()?;
//! assert_eq!(drawn.len(), 10);
//!
//! list.merge([(1, "sup")])?.normalise()?;
//! assert!((list.total() - 1.0).abs() < 1e-12);
//! # Ok::<(), weighted_list::Error>(())
//! ```
//!
//! # Modules
//!
//! | Type | Role |
//! |------|------|
//! | [`WeightedItem`] | A validated (value, weight) pair |
//! | [`Entry`] | Item-like input: bare value, `(weight, value)`, mapping entry |
//! | [`WeightedList`] | Mutable list with weighted indexing |
//! | [`FrozenWeightedList`] | Immutable list with O(log n) lookups |
//! | [`Selects`] | Lazy batch of random draws |
//!
//! # Randomness
//!
//! Every random operation takes the generator as `&mut R where R: Rng`.
//! Each caller, or each thread, owns its generator; a seeded one makes runs
//! reproducible.

pub mod entry;
pub mod error;
pub mod frozen;
mod index;
pub mod item;
pub mod list;
pub mod select;

pub use entry::Entry;
pub use error::{Error, Result};
pub use frozen::FrozenWeightedList;
pub use item::WeightedItem;
pub use list::WeightedList;
pub use select::{Removal, SelectOptions, Selects};
