use std::f64::consts::PI;

use crate::{
    rating::{Rating, RatingDifference, RatingScalar, Volatility},
    score::Score,
};

/// Factor between the public rating scale and the internal Glicko-2 scale.
pub const INTERNAL_RATING_SCALE: f64 = 173.7178;

/// Public rating that maps to `0.0` on the internal scale.
pub const INTERNAL_RATING_ORIGIN: f64 = 1500.0;

/// A rating on the internal Glicko-2 scale (μ).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct InternalRatingScalar(pub f64);

impl From<InternalRatingScalar> for f64 {
    #[inline]
    fn from(InternalRatingScalar(rating): InternalRatingScalar) -> f64 {
        rating
    }
}

impl InternalRatingScalar {
    #[inline]
    pub fn from_external(RatingScalar(rating): RatingScalar) -> InternalRatingScalar {
        InternalRatingScalar((rating - INTERNAL_RATING_ORIGIN) / INTERNAL_RATING_SCALE)
    }

    #[inline]
    pub fn to_external(self) -> RatingScalar {
        RatingScalar(INTERNAL_RATING_SCALE * self.0 + INTERNAL_RATING_ORIGIN)
    }

    /// Expected outcome `E(μ, μⱼ, φⱼ)` against an opponent, strictly between
    /// `0.0` and `1.0` for finite input.
    #[inline]
    pub fn expectation(
        self,
        opponent: InternalRatingScalar,
        opponent_deviation: InternalRatingDifference,
    ) -> f64 {
        self.expectation_terms(opponent, opponent_deviation).expected
    }

    /// Expectation together with its complement, both taken from the tail
    /// `e = exp(-|x|)` of the logistic curve.
    pub(crate) fn expectation_terms(
        self,
        opponent: InternalRatingScalar,
        opponent_deviation: InternalRatingDifference,
    ) -> ExpectationTerms {
        let x = opponent_deviation.g() * (self.0 - opponent.0);
        let tail = (-x.abs()).exp();
        let likely = 1.0 / (1.0 + tail);
        let unlikely = tail / (1.0 + tail);
        if x >= 0.0 {
            ExpectationTerms {
                expected: likely,
                complement: unlikely,
            }
        } else {
            ExpectationTerms {
                expected: unlikely,
                complement: likely,
            }
        }
    }
}

/// `E` and `1 - E`, each accurate even when the other rounds to `1.0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct ExpectationTerms {
    pub expected: f64,
    pub complement: f64,
}

impl ExpectationTerms {
    /// Information `E(1 - E)` carried by one result.
    #[inline]
    pub fn information(self) -> f64 {
        self.expected * self.complement
    }

    /// `s - E`, taken from the complement when `E` is the larger term.
    #[inline]
    pub fn surprise(self, Score(score): Score) -> f64 {
        if self.expected >= self.complement {
            (score - 1.0) + self.complement
        } else {
            score - self.expected
        }
    }
}

/// A rating difference or deviation on the internal Glicko-2 scale (φ).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct InternalRatingDifference(pub f64);

impl From<InternalRatingDifference> for f64 {
    #[inline]
    fn from(InternalRatingDifference(difference): InternalRatingDifference) -> f64 {
        difference
    }
}

impl InternalRatingDifference {
    #[inline]
    pub fn from_external(
        RatingDifference(difference): RatingDifference,
    ) -> InternalRatingDifference {
        InternalRatingDifference(difference / INTERNAL_RATING_SCALE)
    }

    #[inline]
    pub fn to_external(self) -> RatingDifference {
        RatingDifference(INTERNAL_RATING_SCALE * self.0)
    }

    #[inline]
    pub fn sq(self) -> f64 {
        self.0 * self.0
    }

    /// Weighting `g(φ)`. Decreases monotonically, so that results against
    /// uncertain opponents carry less information.
    #[inline]
    pub fn g(self) -> f64 {
        1.0 / (1.0 + 3.0 * self.sq() / (PI * PI)).sqrt()
    }
}

/// A rating record on the internal Glicko-2 scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InternalRating {
    pub rating: InternalRatingScalar,
    pub deviation: InternalRatingDifference,
    pub volatility: Volatility,
}

impl From<&Rating> for InternalRating {
    fn from(rating: &Rating) -> InternalRating {
        InternalRating {
            rating: rating.rating.to_internal(),
            deviation: rating.deviation.to_internal(),
            volatility: rating.volatility,
        }
    }
}

impl From<InternalRating> for Rating {
    fn from(rating: InternalRating) -> Rating {
        Rating {
            rating: rating.rating.to_external(),
            deviation: rating.deviation.to_external(),
            volatility: rating.volatility,
        }
    }
}

impl InternalRating {
    /// The record after a period without comparisons: rating and volatility
    /// are kept, the deviation grows to `√(φ² + σ²)`.
    pub fn idle(&self) -> InternalRating {
        let deviation_sq = self.deviation.sq() + self.volatility.sq();
        InternalRating {
            deviation: InternalRatingDifference(deviation_sq.sqrt()),
            ..*self
        }
    }
}
