//! IRR over evenly spaced cash flows

use serde::{Deserialize, Serialize};

use super::solver::{solve_rate, SolverConfig};
use crate::compounding::growth_factor;
use crate::error::{ensure_finite, CalcError, CalcResult};

/// Calculate the Internal Rate of Return per period
///
/// `cash_flows[0]` is the initial outlay (normally negative); later entries
/// are one period apart. Returns the periodic rate as a decimal, or `None`
/// when no rate zeroes the NPV.
pub fn solve_irr(cash_flows: &[f64], config: &SolverConfig) -> CalcResult<Option<f64>> {
    let times: Vec<f64> = (0..cash_flows.len()).map(|t| t as f64).collect();
    solve_rate(cash_flows, &times, config)
}

/// Annualise a periodic IRR by compounding
pub fn annualize(periodic_rate: f64, periods_per_year: u32) -> f64 {
    growth_factor(periodic_rate, periods_per_year) - 1.0
}

/// Net present value with `cash_flows[0]` undiscounted
pub fn npv(rate: f64, cash_flows: &[f64]) -> CalcResult<f64> {
    ensure_finite("rate", rate)?;
    if rate <= -1.0 {
        return Err(CalcError::invalid_input("rate", "must be greater than -100%"));
    }

    Ok(cash_flows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum())
}

/// IRR request: flows plus how many of them make a year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrInput {
    pub cash_flows: Vec<f64>,
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u32,
    #[serde(default)]
    pub solver: SolverConfig,
}

fn default_periods_per_year() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrResult {
    /// Rate per period, in percent
    pub periodic_irr_percent: Option<f64>,
    /// Compounded annual rate, in percent
    pub annual_irr_percent: Option<f64>,
    /// Sum of all flows, undiscounted
    pub net_cash_flow: f64,
}

pub fn calculate_irr(input: &IrrInput) -> CalcResult<IrrResult> {
    if input.periods_per_year == 0 {
        return Err(CalcError::invalid_input("periods_per_year", "must be at least 1"));
    }

    let periodic = solve_irr(&input.cash_flows, &input.solver)?;

    Ok(IrrResult {
        periodic_irr_percent: periodic.map(|r| r * 100.0),
        annual_irr_percent: periodic.map(|r| annualize(r, input.periods_per_year) * 100.0),
        net_cash_flow: input.cash_flows.iter().sum(),
    })
}
