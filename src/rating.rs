use std::ops::{Add, Mul, Sub};

use crate::{
    error::{Error, Result},
    internal_rating::{InternalRatingDifference, InternalRatingScalar},
};

/// Number representing the strength of an item, such that the difference
/// between two ratings can be used to predict the outcome of a comparison.
/// Higher is better.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct RatingScalar(pub f64);

impl From<RatingScalar> for f64 {
    #[inline]
    fn from(RatingScalar(rating): RatingScalar) -> f64 {
        rating
    }
}

impl From<f64> for RatingScalar {
    #[inline]
    fn from(rating: f64) -> RatingScalar {
        RatingScalar(rating)
    }
}

impl RatingScalar {
    #[inline]
    pub fn to_internal(self) -> InternalRatingScalar {
        InternalRatingScalar::from_external(self)
    }
}

impl Sub<RatingScalar> for RatingScalar {
    type Output = RatingDifference;

    #[inline]
    fn sub(self, rhs: RatingScalar) -> RatingDifference {
        RatingDifference(self.0 - rhs.0)
    }
}

impl Add<RatingDifference> for RatingScalar {
    type Output = RatingScalar;

    #[inline]
    fn add(self, RatingDifference(difference): RatingDifference) -> RatingScalar {
        RatingScalar(self.0 + difference)
    }
}

impl Sub<RatingDifference> for RatingScalar {
    type Output = RatingScalar;

    #[inline]
    fn sub(self, RatingDifference(difference): RatingDifference) -> RatingScalar {
        RatingScalar(self.0 - difference)
    }
}

/// A difference between two ratings. Also the unit of rating deviations.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
pub struct RatingDifference(pub f64);

impl From<RatingDifference> for f64 {
    #[inline]
    fn from(RatingDifference(difference): RatingDifference) -> f64 {
        difference
    }
}

impl From<f64> for RatingDifference {
    #[inline]
    fn from(difference: f64) -> RatingDifference {
        RatingDifference(difference)
    }
}

impl RatingDifference {
    #[inline]
    pub fn to_internal(self) -> InternalRatingDifference {
        InternalRatingDifference::from_external(self)
    }
}

impl Mul<RatingDifference> for f64 {
    type Output = RatingDifference;

    #[inline]
    fn mul(self, RatingDifference(difference): RatingDifference) -> RatingDifference {
        RatingDifference(self * difference)
    }
}

/// Number indicating the degree of expected fluctuation in a rating.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Volatility(pub f64);

impl Volatility {
    #[inline]
    pub(crate) fn sq(self) -> f64 {
        self.0 * self.0
    }
}

impl From<Volatility> for f64 {
    #[inline]
    fn from(Volatility(volatility): Volatility) -> f64 {
        volatility
    }
}

impl From<f64> for Volatility {
    #[inline]
    fn from(volatility: f64) -> Volatility {
        Volatility(volatility)
    }
}

/// The rating record of a single item.
///
/// Records are values: an update produces a new record, with all three
/// fields changed together.
#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    /// Number indicating strength. Higher is better. The difference between
    /// two ratings determines the expected outcome of a comparison between
    /// the two items.
    pub rating: RatingScalar,
    /// Uncertainty in the rating. A range from rating minus twice the
    /// deviation to rating plus twice the deviation approximately represents
    /// a 95% confidence interval.
    pub deviation: RatingDifference,
    /// Number indicating the degree of expected fluctuation in the rating.
    pub volatility: Volatility,
}

impl Rating {
    pub fn new(rating: f64, deviation: f64, volatility: f64) -> Rating {
        Rating {
            rating: RatingScalar(rating),
            deviation: RatingDifference(deviation),
            volatility: Volatility(volatility),
        }
    }

    /// Approximate 95% confidence interval, `rating ± 2 * deviation`.
    pub fn confidence_interval(&self) -> (RatingScalar, RatingScalar) {
        let margin = 2.0 * self.deviation;
        (self.rating - margin, self.rating + margin)
    }

    /// Checks that the rating is finite and that deviation and volatility are
    /// finite and strictly positive.
    pub fn validate(&self) -> Result<&Rating> {
        let RatingScalar(rating) = self.rating;
        let RatingDifference(deviation) = self.deviation;
        let Volatility(volatility) = self.volatility;

        if rating.is_finite()
            && deviation.is_finite()
            && deviation > 0.0
            && volatility.is_finite()
            && volatility > 0.0
        {
            Ok(self)
        } else {
            Err(Error::InvalidRating {
                rating,
                deviation,
                volatility,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_interval() {
        let rating = Rating::new(1600.0, 80.0, 0.06);
        assert_eq!(
            rating.confidence_interval(),
            (RatingScalar(1440.0), RatingScalar(1760.0))
        );
    }

    #[test]
    fn test_validate() {
        assert!(Rating::new(1500.0, 350.0, 0.06).validate().is_ok());
        assert!(Rating::new(-250.0, 0.5, 0.001).validate().is_ok());

        for invalid in [
            Rating::new(f64::NAN, 350.0, 0.06),
            Rating::new(f64::INFINITY, 350.0, 0.06),
            Rating::new(1500.0, 0.0, 0.06),
            Rating::new(1500.0, -10.0, 0.06),
            Rating::new(1500.0, 350.0, 0.0),
            Rating::new(1500.0, 350.0, f64::NAN),
        ] {
            assert!(
                matches!(invalid.validate(), Err(Error::InvalidRating { .. })),
                "{invalid:?} should be rejected"
            );
        }
    }
}
