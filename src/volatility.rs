use tracing::{trace, warn};

use crate::{
    error::{Error, Result},
    internal_rating::InternalRatingDifference,
    rating::Volatility,
};

/// Safety cap for both the bracket expansion and the secant iteration.
pub const MAX_ITERATIONS: u32 = 1000;

/// Inputs of step 5 of Glickman's Glicko-2 procedure.
#[derive(Debug, Copy, Clone)]
pub(crate) struct VolatilityUpdate {
    pub deviation: InternalRatingDifference,
    pub volatility: Volatility,
    /// Estimated improvement `δ`.
    pub delta: f64,
    /// Estimated variance `v` of the rating based on the outcomes.
    pub variance: f64,
}

impl VolatilityUpdate {
    /// Solves `f(x) = 0` for the new volatility with the Illinois variant of
    /// regula falsi, returning `σ' = exp(A / 2)`.
    pub fn solve(&self, tau: f64, tolerance: f64) -> Result<Volatility> {
        let phi_sq = self.deviation.sq();
        let delta_sq = self.delta * self.delta;
        let variance = self.variance;
        let tau_sq = tau * tau;
        let a = self.volatility.sq().ln();

        let f = |x: f64| {
            let ex = x.exp();
            let denominator = phi_sq + variance + ex;
            ex * (delta_sq - phi_sq - variance - ex) / (2.0 * denominator * denominator)
                - (x - a) / tau_sq
        };

        let mut lower = a;
        let mut upper = if delta_sq > phi_sq + variance {
            (delta_sq - phi_sq - variance).ln()
        } else {
            let mut k = 1;
            loop {
                if k > MAX_ITERATIONS {
                    return Err(self.diverged("could not bracket the volatility root"));
                }
                let candidate = a - f64::from(k) * tau;
                if f(candidate) >= 0.0 {
                    break candidate;
                }
                k += 1;
            }
        };

        let mut f_lower = f(lower);
        let mut f_upper = f(upper);

        let mut iterations = 0;
        while (upper - lower).abs() > tolerance {
            if iterations >= MAX_ITERATIONS {
                return Err(self.diverged("volatility iteration did not converge"));
            }
            iterations += 1;

            if f_upper == f_lower {
                return Err(self.diverged("degenerate secant step in volatility iteration"));
            }

            let candidate = lower + (lower - upper) * f_lower / (f_upper - f_lower);
            let f_candidate = f(candidate);
            if !f_candidate.is_finite() {
                return Err(self.diverged("non-finite value in volatility iteration"));
            }

            if f_candidate * f_upper <= 0.0 {
                lower = upper;
                f_lower = f_upper;
            } else {
                f_lower /= 2.0;
            }

            upper = candidate;
            f_upper = f_candidate;
        }

        trace!(iterations, "volatility converged");
        Ok(Volatility((lower / 2.0).exp()))
    }

    fn diverged(&self, reason: &'static str) -> Error {
        warn!(update = ?self, reason, "volatility update diverged");
        Error::NumericalDivergence { reason }
    }
}
