#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use pairwise_glicko2::{apply_match, Error};

#[derive(Arbitrary, Debug)]
struct ArbitraryRating {
    rating: f64,
    deviation: f64,
    volatility: f64,
}

impl ArbitraryRating {
    fn into_clamped(self) -> Option<(f64, f64, f64)> {
        if self.rating.is_nan() || self.deviation.is_nan() || self.volatility.is_nan() {
            None
        } else {
            Some((
                self.rating.clamp(-10000.0, 10000.0),
                self.deviation.clamp(1e-3, 1000.0),
                self.volatility.clamp(1e-4, 1.0),
            ))
        }
    }
}

#[derive(Arbitrary, Debug)]
struct Match {
    first: ArbitraryRating,
    second: ArbitraryRating,
    outcome: f64,
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(m) = Match::arbitrary(&mut u) else {
        return;
    };
    let (Some(a), Some(b)) = (m.first.into_clamped(), m.second.into_clamped()) else {
        return;
    };

    match apply_match(a.0, a.1, a.2, b.0, b.1, b.2, m.outcome) {
        Ok((rating_a, deviation_a, volatility_a, rating_b, deviation_b, volatility_b)) => {
            assert!((0.0..=1.0).contains(&m.outcome));
            for value in [rating_a, rating_b] {
                assert!(value.is_finite());
            }
            for value in [deviation_a, volatility_a, deviation_b, volatility_b] {
                assert!(value.is_finite() && value > 0.0);
            }
        }
        Err(Error::InvalidOutcome(outcome)) => {
            assert!(!(0.0..=1.0).contains(&outcome));
        }
        Err(Error::NumericalDivergence { .. }) => {}
        Err(err) => panic!("unexpected error for clamped input: {err}"),
    }
});
