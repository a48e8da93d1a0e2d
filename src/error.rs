//! Errors returned by weighted list operations.

use thiserror::Error;

/// Everything that can go wrong when building, indexing, or sampling a
/// weighted list.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The weight was NaN.
    #[error("item weight must be a number, got NaN")]
    NotANumber,
    /// The weight was below zero.
    #[error("item weight cannot be negative (got {0})")]
    NegativeWeight(f64),
    /// The weight was positive or negative infinity.
    #[error("item weight cannot be infinite")]
    InfiniteWeight,
    /// A weighted index fell outside `[-total, total)`.
    #[error("weighted index {index} out of range for total weight {total}")]
    IndexOutOfRange { index: f64, total: f64 },
    /// A batch of draws ran out of weight before it was complete.
    #[error("selection pool exhausted after {drawn} of {requested} draws")]
    Exhausted { drawn: usize, requested: usize },
    /// Normalising needs a positive total to scale against.
    #[error("cannot normalise a list whose total weight is zero")]
    ZeroTotal,
    /// An operation the list deliberately does not provide.
    #[error("{0} is not supported by weighted lists")]
    Unsupported(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
