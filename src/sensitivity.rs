//! Parallel sensitivity runner
//!
//! Calculators are pure, so batches of inputs are evaluated with rayon and
//! results come back in input order.

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::calculator::Calculator;
use crate::error::{ensure_finite, CalcError, CalcResult};
use crate::flows::{calculate_sip, SipInput};
use crate::loans::emi;
use crate::ratios::MultipleTable;
use crate::request::{CalculationRequest, CalculationResponse};

/// One point of an EMI sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiPoint {
    pub annual_rate_percent: f64,
    pub tenure_months: u32,
    pub monthly_emi: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

/// One point of a SIP sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipPoint {
    pub annual_return_percent: f64,
    pub years: u32,
    pub total_invested: f64,
    pub estimated_returns: f64,
    pub total_value: f64,
}

/// Evaluates many calculator inputs in parallel
///
/// # Example
/// ```ignore
/// let runner = SensitivityRunner::new();
/// let rates = rate_range(8.0, 10.0, 0.25)?;
/// let points = runner.emi_grid(3_000_000.0, &rates, &[180, 240, 300])?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SensitivityRunner {
    /// Multiples used for valuation requests
    table: MultipleTable,
}

impl SensitivityRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner that values companies with a custom multiple table
    pub fn with_table(table: MultipleTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &MultipleTable {
        &self.table
    }

    /// Evaluate inputs of one calculator type, preserving order
    pub fn run_batch<C: Calculator>(&self, inputs: &[C]) -> Vec<CalcResult<C::Output>> {
        debug!("Running batch of {} inputs", inputs.len());
        inputs.par_iter().map(|input| input.calculate()).collect()
    }

    /// Evaluate mixed requests into response envelopes
    pub fn run_requests(&self, requests: &[CalculationRequest]) -> Vec<CalculationResponse> {
        debug!("Running {} requests", requests.len());
        requests
            .par_iter()
            .map(|request| request.respond_with(&self.table))
            .collect()
    }

    /// EMI for every (rate, tenure) pair, rate-major
    pub fn emi_grid(
        &self,
        principal: f64,
        rates: &[f64],
        tenures: &[u32],
    ) -> CalcResult<Vec<EmiPoint>> {
        let grid: Vec<(f64, u32)> = rates
            .iter()
            .flat_map(|&rate| tenures.iter().map(move |&months| (rate, months)))
            .collect();

        grid.par_iter()
            .map(|&(rate, months)| -> CalcResult<EmiPoint> {
                let monthly_emi = emi(principal, rate, months)?;
                let total_payment = monthly_emi * months as f64;
                Ok(EmiPoint {
                    annual_rate_percent: rate,
                    tenure_months: months,
                    monthly_emi,
                    total_payment,
                    total_interest: total_payment - principal,
                })
            })
            .collect()
    }

    /// SIP outcome for every (return, years) pair, return-major
    pub fn sip_grid(
        &self,
        monthly_investment: f64,
        returns: &[f64],
        years: &[u32],
        step_up_percent: f64,
    ) -> CalcResult<Vec<SipPoint>> {
        let grid: Vec<(f64, u32)> = returns
            .iter()
            .flat_map(|&rate| years.iter().map(move |&y| (rate, y)))
            .collect();

        grid.par_iter()
            .map(|&(rate, y)| -> CalcResult<SipPoint> {
                let result = calculate_sip(&SipInput {
                    monthly_investment,
                    annual_return_percent: rate,
                    years: y,
                    step_up_percent,
                })?;
                Ok(SipPoint {
                    annual_return_percent: rate,
                    years: y,
                    total_invested: result.total_invested,
                    estimated_returns: result.estimated_returns,
                    total_value: result.total_value,
                })
            })
            .collect()
    }
}

/// Evenly spaced rates from `start` to `end` inclusive
pub fn rate_range(start: f64, end: f64, step: f64) -> CalcResult<Vec<f64>> {
    let start = ensure_finite("start", start)?;
    let end = ensure_finite("end", end)?;
    let step = ensure_finite("step", step)?;

    if step <= 0.0 {
        return Err(CalcError::invalid_input("step", "must be positive"));
    }
    if end < start {
        return Err(CalcError::invalid_input("end", "must not be below start"));
    }

    // Small slack so float division does not drop the end point
    let count = ((end - start) / step + 1e-9).floor() as usize;
    Ok((0..=count).map(|i| start + i as f64 * step).collect())
}
