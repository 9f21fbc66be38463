//! Compounding and amortization primitives
//!
//! Every deposit, investment and loan calculator in the crate composes these
//! functions instead of carrying its own copy of the compound-interest math.

mod amortization;
mod frequency;

pub use amortization::{AmortizationRow, AmortizationSchedule, YearlySummary};
pub use frequency::{monthly_rate, CompoundingFrequency};

use serde::{Deserialize, Serialize};

use crate::error::{ensure_denominator, ensure_non_negative, ensure_periods, CalcResult};

/// When a periodic flow lands relative to that period's growth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowTiming {
    /// Flow first, then a full period of growth (annuity-due)
    BeginningOfPeriod,
    /// Growth first, then the flow (ordinary annuity)
    EndOfPeriod,
}

/// Growth factor `(1 + r)^n`
///
/// Counts beyond `i32::MAX` fall back to `powf` instead of wrapping.
pub fn growth_factor(periodic_rate: f64, num_periods: u32) -> f64 {
    match i32::try_from(num_periods) {
        Ok(n) => (1.0 + periodic_rate).powi(n),
        Err(_) => (1.0 + periodic_rate).powf(num_periods as f64),
    }
}

/// Compound a principal: `principal × (1 + r)^n`
pub fn compounded_value(principal: f64, periodic_rate: f64, num_periods: u32) -> CalcResult<f64> {
    ensure_non_negative("principal", principal)?;
    ensure_non_negative("periodic_rate", periodic_rate)?;

    Ok(principal * growth_factor(periodic_rate, num_periods))
}

/// Level payment that retires `principal` over `num_periods`
///
/// Uses `P × r × (1+r)^n / ((1+r)^n − 1)`, degenerating to `P / n` at a zero
/// rate. Zero periods is rejected since no payment is defined.
pub fn amortized_payment(principal: f64, periodic_rate: f64, num_periods: u32) -> CalcResult<f64> {
    ensure_non_negative("principal", principal)?;
    ensure_non_negative("periodic_rate", periodic_rate)?;
    ensure_periods("num_periods", num_periods)?;

    if periodic_rate == 0.0 {
        return Ok(principal / num_periods as f64);
    }

    let factor = growth_factor(periodic_rate, num_periods);
    Ok(principal * periodic_rate * factor / (factor - 1.0))
}

/// Future value of `num_periods` level payments
pub fn annuity_future_value(
    payment: f64,
    periodic_rate: f64,
    num_periods: u32,
    timing: FlowTiming,
) -> CalcResult<f64> {
    ensure_non_negative("payment", payment)?;
    ensure_non_negative("periodic_rate", periodic_rate)?;

    if periodic_rate == 0.0 {
        return Ok(payment * num_periods as f64);
    }

    let ordinary = payment * (growth_factor(periodic_rate, num_periods) - 1.0) / periodic_rate;
    Ok(match timing {
        FlowTiming::BeginningOfPeriod => ordinary * (1.0 + periodic_rate),
        FlowTiming::EndOfPeriod => ordinary,
    })
}

/// Compound annual growth rate as a decimal (0.12 for 12%)
pub fn cagr(beginning_value: f64, ending_value: f64, years: f64) -> CalcResult<f64> {
    ensure_denominator("beginning_value", beginning_value)?;
    ensure_non_negative("ending_value", ending_value)?;
    ensure_denominator("years", years)?;

    Ok((ending_value / beginning_value).powf(1.0 / years) - 1.0)
}
