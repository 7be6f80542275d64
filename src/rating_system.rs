use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    internal_rating::{InternalRating, InternalRatingDifference, InternalRatingScalar},
    rating::Rating,
    score::Score,
    volatility::VolatilityUpdate,
};

pub const DEFAULT_RATING: f64 = 1500.0;
pub const DEFAULT_DEVIATION: f64 = 350.0;
pub const DEFAULT_VOLATILITY: f64 = 0.06;

/// System constant `τ`, constraining the change in volatility over time.
pub const DEFAULT_TAU: f64 = 0.5;

/// Convergence tolerance `ε` of the volatility iteration.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone)]
pub struct RatingSystemBuilder {
    default_rating: f64,
    default_deviation: f64,
    default_volatility: f64,

    tau: f64,
    convergence_tolerance: f64,
}

impl Default for RatingSystemBuilder {
    fn default() -> RatingSystemBuilder {
        RatingSystemBuilder::new()
    }
}

impl RatingSystemBuilder {
    pub fn new() -> RatingSystemBuilder {
        RatingSystemBuilder {
            default_rating: DEFAULT_RATING,
            default_deviation: DEFAULT_DEVIATION,
            default_volatility: DEFAULT_VOLATILITY,

            tau: DEFAULT_TAU,
            convergence_tolerance: CONVERGENCE_TOLERANCE,
        }
    }

    pub fn default_rating(&mut self, default_rating: f64) -> &mut Self {
        assert!(default_rating.is_finite());
        self.default_rating = default_rating;
        self
    }

    pub fn default_deviation(&mut self, default_deviation: f64) -> &mut Self {
        assert!(default_deviation.is_finite() && default_deviation > 0.0);
        self.default_deviation = default_deviation;
        self
    }

    pub fn default_volatility(&mut self, default_volatility: f64) -> &mut Self {
        assert!(default_volatility.is_finite() && default_volatility > 0.0);
        self.default_volatility = default_volatility;
        self
    }

    pub fn tau(&mut self, tau: f64) -> &mut Self {
        assert!(tau.is_finite() && tau > 0.0);
        self.tau = tau;
        self
    }

    pub fn convergence_tolerance(&mut self, convergence_tolerance: f64) -> &mut Self {
        assert!(convergence_tolerance > 0.0);
        self.convergence_tolerance = convergence_tolerance;
        self
    }

    pub fn build(&self) -> RatingSystem {
        RatingSystem {
            default_rating: self.default_rating,
            default_deviation: self.default_deviation,
            default_volatility: self.default_volatility,

            tau: self.tau,
            convergence_tolerance: self.convergence_tolerance,
        }
    }
}

/// A single result of an item, used as input to
/// [`RatingSystem::update_single()`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Opponent {
    pub rating: InternalRatingScalar,
    pub deviation: InternalRatingDifference,
    /// Outcome from the perspective of the item being updated.
    pub score: Score,
}

impl Opponent {
    pub fn new(opponent: &InternalRating, score: Score) -> Opponent {
        Opponent {
            rating: opponent.rating,
            deviation: opponent.deviation,
            score,
        }
    }
}

/// Glicko-2 rating system for pairwise comparisons.
///
/// The system is immutable once built. All updates are pure: they take
/// rating records by reference and return new records, leaving persistence
/// to the caller.
#[derive(Debug, Clone)]
pub struct RatingSystem {
    default_rating: f64,
    default_deviation: f64,
    default_volatility: f64,

    tau: f64,
    convergence_tolerance: f64,
}

impl Default for RatingSystem {
    fn default() -> RatingSystem {
        RatingSystem::new()
    }
}

impl RatingSystem {
    pub fn builder() -> RatingSystemBuilder {
        RatingSystemBuilder::default()
    }

    pub fn new() -> RatingSystem {
        RatingSystem::builder().build()
    }

    pub fn default_rating(&self) -> f64 {
        self.default_rating
    }

    pub fn default_deviation(&self) -> f64 {
        self.default_deviation
    }

    pub fn default_volatility(&self) -> f64 {
        self.default_volatility
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    pub fn convergence_tolerance(&self) -> f64 {
        self.convergence_tolerance
    }

    /// Rating record for an item that just entered the pool.
    pub fn new_rating(&self) -> Rating {
        Rating::new(
            self.default_rating,
            self.default_deviation,
            self.default_volatility,
        )
    }

    /// Expected outcome of a comparison between `first` and `second`, from
    /// the perspective of `first`.
    pub fn expected_score(&self, first: &Rating, second: &Rating) -> Score {
        let first = InternalRating::from(first);
        let second = InternalRating::from(second);
        Score(first.rating.expectation(second.rating, second.deviation))
    }

    /// Updates a single item against a set of results, all of which are
    /// evaluated against the pre-update record of the item.
    ///
    /// Without any results, the item is treated as idle for one period: its
    /// deviation grows by its volatility.
    pub fn update_single(
        &self,
        player: &InternalRating,
        opponents: &[Opponent],
    ) -> Result<InternalRating> {
        if opponents.is_empty() {
            return Ok(player.idle());
        }

        let mut inverse_variance = 0.0;
        let mut improvement = 0.0;
        for opponent in opponents {
            let g = opponent.deviation.g();
            let terms = player
                .rating
                .expectation_terms(opponent.rating, opponent.deviation);
            inverse_variance += g * g * terms.information();
            improvement += g * terms.surprise(opponent.score);
        }

        let variance = inverse_variance.recip();
        if !variance.is_finite() {
            // Even the logistic tail underflowed, so the outcomes carry no
            // information the model can use.
            warn!(?player, "estimated variance is not finite");
            return Err(Error::NumericalDivergence {
                reason: "estimated variance is not finite",
            });
        }

        let volatility = VolatilityUpdate {
            deviation: player.deviation,
            volatility: player.volatility,
            delta: variance * improvement,
            variance,
        }
        .solve(self.tau, self.convergence_tolerance)?;

        let pre_period_deviation_sq = player.deviation.sq() + volatility.sq();
        let deviation = 1.0 / (1.0 / pre_period_deviation_sq + 1.0 / variance).sqrt();
        let rating = f64::from(player.rating) + deviation * deviation * improvement;

        let valid = |value: f64| value.is_finite() && value > 0.0;
        if !rating.is_finite() || !valid(deviation) || !valid(volatility.into()) {
            warn!(?player, rating, deviation, "rating update left the valid range");
            return Err(Error::NumericalDivergence {
                reason: "rating update produced an invalid record",
            });
        }

        Ok(InternalRating {
            rating: InternalRatingScalar(rating),
            deviation: InternalRatingDifference(deviation),
            volatility,
        })
    }

    /// Updates both items after a single comparison. `score` is the outcome
    /// from the perspective of `first`.
    ///
    /// Both sides are computed independently from the same pre-match
    /// records, so the result does not depend on the order of the items.
    pub fn update_ratings(
        &self,
        first: &Rating,
        second: &Rating,
        score: Score,
    ) -> Result<(Rating, Rating)> {
        let score = score.validate()?;
        let first_before = InternalRating::from(first.validate()?);
        let second_before = InternalRating::from(second.validate()?);

        let first_after =
            self.update_single(&first_before, &[Opponent::new(&second_before, score)])?;
        let second_after = self.update_single(
            &second_before,
            &[Opponent::new(&first_before, score.opposite())],
        )?;

        let (first_after, second_after) = (Rating::from(first_after), Rating::from(second_after));
        debug!(
            score = score.value(),
            first_rating = f64::from(first_after.rating),
            first_deviation = f64::from(first_after.deviation),
            second_rating = f64::from(second_after.rating),
            second_deviation = f64::from(second_after.deviation),
            "applied match"
        );
        Ok((first_after, second_after))
    }

    /// Records that `winner` was preferred over `loser`.
    pub fn record_vote(&self, winner: &Rating, loser: &Rating) -> Result<(Rating, Rating)> {
        self.update_ratings(winner, loser, Score::WIN)
    }

    /// Record of an item after a rating period without comparisons.
    pub fn idle(&self, rating: &Rating) -> Result<Rating> {
        let before = InternalRating::from(rating.validate()?);
        self.update_single(&before, &[]).map(Rating::from)
    }
}

/// Applies a single comparison to two raw rating records using the default
/// [`RatingSystem`].
///
/// Returns `(rating_a, deviation_a, volatility_a, rating_b, deviation_b,
/// volatility_b)` after the match.
#[allow(clippy::type_complexity)]
pub fn apply_match(
    rating_a: f64,
    deviation_a: f64,
    volatility_a: f64,
    rating_b: f64,
    deviation_b: f64,
    volatility_b: f64,
    outcome_a: f64,
) -> Result<(f64, f64, f64, f64, f64, f64)> {
    let score = Score::new(outcome_a)?;
    let (a, b) = RatingSystem::default().update_ratings(
        &Rating::new(rating_a, deviation_a, volatility_a),
        &Rating::new(rating_b, deviation_b, volatility_b),
        score,
    )?;
    Ok((
        a.rating.into(),
        a.deviation.into(),
        a.volatility.into(),
        b.rating.into(),
        b.deviation.into(),
        b.volatility.into(),
    ))
}

/// Log likelihood deviance metric that can be used to evaluate the quality of
/// rating system predictions.
///
/// Lower is better.
///
/// See https://www.kaggle.com/c/ChessRatings2/overview/evaluation.
pub fn deviance(Score(expected): Score, Score(actual): Score) -> f64 {
    let expected = expected.clamp(0.01, 0.99);
    -(actual * expected.log10() + (1.0 - actual) * (1.0 - expected).log10())
}
