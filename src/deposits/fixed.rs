//! Fixed deposit maturity

use serde::{Deserialize, Serialize};

use crate::compounding::{compounded_value, growth_factor, CompoundingFrequency};
use crate::error::{checked_periods, ensure_non_negative, ensure_periods, CalcResult};
use crate::flows::PeriodRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedDepositInput {
    pub principal: f64,
    /// Annual interest rate, in percent
    pub annual_rate_percent: f64,
    pub years: u32,
    #[serde(default)]
    pub compounding: CompoundingFrequency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedDepositResult {
    pub principal: f64,
    pub maturity_amount: f64,
    pub total_interest: f64,
    /// Annualised yield after compounding, in percent
    pub effective_annual_rate_percent: f64,
    /// Year-end balances
    pub yearly: Vec<PeriodRow>,
}

pub fn calculate_fixed_deposit(input: &FixedDepositInput) -> CalcResult<FixedDepositResult> {
    ensure_non_negative("principal", input.principal)?;
    ensure_non_negative("annual_rate_percent", input.annual_rate_percent)?;
    let years = ensure_periods("years", input.years)?;

    let per_year = input.compounding.periods_per_year();
    // Bounds every `per_year * year` below
    checked_periods("years", years, per_year)?;
    let rate = input.compounding.periodic_rate(input.annual_rate_percent);

    let mut yearly = Vec::with_capacity(years as usize);
    let mut previous = input.principal;
    for year in 1..=years {
        let value = compounded_value(input.principal, rate, per_year * year)?;
        yearly.push(PeriodRow {
            period: year,
            flow: 0.0,
            growth: value - previous,
            value,
        });
        previous = value;
    }

    let maturity_amount = previous;

    Ok(FixedDepositResult {
        principal: input.principal,
        maturity_amount,
        total_interest: maturity_amount - input.principal,
        effective_annual_rate_percent: (growth_factor(rate, per_year) - 1.0) * 100.0,
        yearly,
    })
}
