use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Fewer than two items could be drawn from the pool.
    #[error("need at least 2 items to form a pair, got {available}")]
    InsufficientItems { available: usize },

    /// Match outcome outside of `0.0..=1.0`.
    #[error("invalid match outcome {0} (expected a value in 0.0..=1.0)")]
    InvalidOutcome(f64),

    /// Rating record with a non-finite rating, or a deviation or volatility
    /// that is not strictly positive.
    #[error("invalid rating {rating} with deviation {deviation} and volatility {volatility}")]
    InvalidRating {
        rating: f64,
        deviation: f64,
        volatility: f64,
    },

    /// The rating update broke down numerically. Not expected for valid
    /// input.
    #[error("numerical divergence in rating update: {reason}")]
    NumericalDivergence { reason: &'static str },
}
