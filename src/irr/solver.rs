//! Newton-Raphson root finding on the NPV curve

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, CalcError, CalcResult};

/// Derivative magnitude below which the curve is treated as flat
const FLAT_DERIVATIVE: f64 = 1e-10;

/// Step applied to the guess when the curve is flat
const FLAT_NUDGE: f64 = 0.01;

/// Iterates are kept above this so `1 + r` stays positive
const RATE_FLOOR: f64 = -0.99;

/// Tuning for the IRR/XIRR solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub initial_guess: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
    /// Starting point for the single retry after the first run stalls
    pub retry_guess: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.1,
            tolerance: 1e-10,
            max_iterations: 1000,
            retry_guess: 0.01,
        }
    }
}

/// Find the rate zeroing `Σ amounts[i] / (1+r)^times[i]`
///
/// Returns `Ok(None)` when no rate exists or the solver fails from both the
/// initial and the retry guess.
pub(crate) fn solve_rate(amounts: &[f64], times: &[f64], config: &SolverConfig) -> CalcResult<Option<f64>> {
    if amounts.len() < 2 {
        return Err(CalcError::InsufficientCashFlows {
            required: 2,
            actual: amounts.len(),
        });
    }
    for &amount in amounts {
        ensure_finite("cash_flow", amount)?;
    }
    ensure_finite("initial_guess", config.initial_guess)?;
    ensure_finite("retry_guess", config.retry_guess)?;
    if !(config.tolerance > 0.0) {
        return Err(CalcError::invalid_input("tolerance", "must be positive"));
    }

    // Without a sign change the NPV never crosses zero for r > -1
    let has_positive = amounts.iter().any(|&cf| cf > 0.0);
    let has_negative = amounts.iter().any(|&cf| cf < 0.0);
    if !has_positive || !has_negative {
        debug!("No sign change in {} cash flows, rate undefined", amounts.len());
        return Ok(None);
    }

    if let Some(rate) = newton(amounts, times, config.initial_guess, config) {
        return Ok(Some(rate));
    }

    debug!(
        "Solver stalled from guess {}, retrying from {}",
        config.initial_guess, config.retry_guess
    );
    if let Some(rate) = newton(amounts, times, config.retry_guess, config) {
        return Ok(Some(rate));
    }

    warn!(
        "No rate found for {} cash flows after {} iterations per guess",
        amounts.len(),
        config.max_iterations
    );
    Ok(None)
}

/// One Newton-Raphson run from `guess`
fn newton(amounts: &[f64], times: &[f64], guess: f64, config: &SolverConfig) -> Option<f64> {
    let mut rate = guess.max(RATE_FLOOR);

    for iteration in 0..config.max_iterations {
        let (npv, dnpv) = npv_and_derivative(amounts, times, rate);

        if !npv.is_finite() || !dnpv.is_finite() {
            return None;
        }

        if npv.abs() < config.tolerance {
            debug!("Converged on NPV at iteration {}: rate={}", iteration, rate);
            return Some(rate);
        }

        if dnpv.abs() < FLAT_DERIVATIVE {
            rate += FLAT_NUDGE;
            continue;
        }

        let new_rate = rate - npv / dnpv;

        // A step clamped to the floor is never a converged step; the NPV
        // check above is the only way to accept the floor itself
        if new_rate < RATE_FLOOR {
            if rate <= RATE_FLOOR {
                debug!("Pinned at rate floor with NPV {} at iteration {}", npv, iteration);
                return None;
            }
            rate = RATE_FLOOR;
            continue;
        }

        if (new_rate - rate).abs() < config.tolerance {
            debug!("Converged on step at iteration {}: rate={}", iteration, new_rate);
            return Some(new_rate);
        }

        rate = new_rate;
    }

    None
}

/// NPV and its derivative with respect to rate
pub(crate) fn npv_and_derivative(amounts: &[f64], times: &[f64], rate: f64) -> (f64, f64) {
    let base = 1.0 + rate;
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (&cf, &t) in amounts.iter().zip(times) {
        npv += cf / base.powf(t);
        if t != 0.0 {
            dnpv -= t * cf / base.powf(t + 1.0);
        }
    }

    (npv, dnpv)
}
