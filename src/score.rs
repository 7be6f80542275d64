use crate::error::{Error, Result};

/// A match outcome or expectation value in the range `0.0..=1.0`, from the
/// perspective of the first item, where `0.0` is a loss and `1.0` is a win.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
pub struct Score(pub f64);

impl From<Score> for f64 {
    #[inline]
    fn from(Score(score): Score) -> f64 {
        score
    }
}

impl TryFrom<f64> for Score {
    type Error = Error;

    fn try_from(score: f64) -> Result<Score> {
        Score::new(score)
    }
}

impl Score {
    pub const LOSS: Score = Score(0.0);
    pub const DRAW: Score = Score(0.5);
    pub const WIN: Score = Score(1.0);

    /// Checked constructor. Rejects NaN and anything outside `0.0..=1.0`.
    pub fn new(score: f64) -> Result<Score> {
        Score(score).validate()
    }

    pub fn validate(self) -> Result<Score> {
        if (0.0..=1.0).contains(&self.0) {
            Ok(self)
        } else {
            Err(Error::InvalidOutcome(self.0))
        }
    }

    #[must_use]
    #[inline]
    pub fn opposite(self) -> Score {
        Score(1.0 - self.0)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_outcomes_are_valid() {
        for score in [Score::LOSS, Score::DRAW, Score::WIN] {
            assert_eq!(Score::new(score.value()), Ok(score));
        }
        assert_eq!(Score::try_from(0.25), Ok(Score(0.25)));
    }

    #[test]
    fn test_out_of_range_outcomes_are_rejected() {
        assert_eq!(Score::new(1.5), Err(Error::InvalidOutcome(1.5)));
        assert_eq!(Score::new(-0.1), Err(Error::InvalidOutcome(-0.1)));
        assert!(matches!(Score::new(f64::NAN), Err(Error::InvalidOutcome(_))));
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Score::WIN.opposite(), Score::LOSS);
        assert_eq!(Score::DRAW.opposite(), Score::DRAW);
        assert_eq!(Score(0.75).opposite(), Score(0.25));
    }
}
