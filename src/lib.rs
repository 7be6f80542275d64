//! Ranking items from pairwise preferences with the Glicko-2 rating system.
//!
//! Each resolved comparison ("A preferred over B", or a draw) updates the
//! ratings of both items with [`RatingSystem::update_ratings()`]. Every item
//! carries a deviation that measures how uncertain its rating still is, and
//! [`select_pair()`] prefers uncertain items when choosing what to compare
//! next.
//!
//! All functions are pure. Storing rating records, and serializing updates
//! that touch the same item, is up to the caller.
//!
//! ```
//! use pairwise_glicko2::{select_pair, PoolEntry, RatingSystem, Score};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let system = RatingSystem::new();
//! let mut ratings = vec![system.new_rating(); 3];
//!
//! let pool: Vec<_> = ratings
//!     .iter()
//!     .enumerate()
//!     .map(|(id, rating)| PoolEntry::from_rating(id, rating))
//!     .collect();
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let (a, b) = select_pair(&pool, &mut rng).expect("at least 2 items");
//!
//! // Judge: a is preferred over b.
//! let (rating_a, rating_b) = system.update_ratings(&ratings[a], &ratings[b], Score::WIN)?;
//! ratings[a] = rating_a;
//! ratings[b] = rating_b;
//! assert!(ratings[a].rating > ratings[b].rating);
//! # Ok::<_, pairwise_glicko2::Error>(())
//! ```

mod error;
mod internal_rating;
mod leaderboard;
mod rating;
mod rating_system;
mod sampler;
mod score;
mod volatility;

pub use error::{Error, Result};
pub use internal_rating::{
    InternalRating, InternalRatingDifference, InternalRatingScalar, INTERNAL_RATING_ORIGIN,
    INTERNAL_RATING_SCALE,
};
pub use leaderboard::{leaderboard, Standing};
pub use rating::{Rating, RatingDifference, RatingScalar, Volatility};
pub use rating_system::{
    apply_match, deviance, Opponent, RatingSystem, RatingSystemBuilder, CONVERGENCE_TOLERANCE,
    DEFAULT_DEVIATION, DEFAULT_RATING, DEFAULT_TAU, DEFAULT_VOLATILITY,
};
pub use sampler::{select_pair, selection_weight, try_select_pair, PoolEntry};
pub use score::Score;
pub use volatility::MAX_ITERATIONS;
