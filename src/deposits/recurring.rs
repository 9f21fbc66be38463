//! Recurring deposit with quarterly compounding
//!
//! Banks compound RD balances quarterly while deposits land monthly. Running
//! the monthly simulation at the equivalent monthly rate `(1 + r/4)^(1/3) − 1`
//! gives each deposit exactly `(1 + r/4)^(months_remaining / 3)` of growth.

use serde::{Deserialize, Serialize};

use crate::compounding::{CompoundingFrequency, FlowTiming};
use crate::error::{ensure_non_negative, ensure_periods, CalcResult};
use crate::flows::{FlowDirection, FlowSimulator, PeriodRow, SimulationConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringDepositInput {
    pub monthly_deposit: f64,
    /// Annual interest rate, in percent
    pub annual_rate_percent: f64,
    pub months: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringDepositResult {
    pub total_deposited: f64,
    pub maturity_amount: f64,
    pub total_interest: f64,
    pub schedule: Vec<PeriodRow>,
}

pub fn calculate_recurring_deposit(
    input: &RecurringDepositInput,
) -> CalcResult<RecurringDepositResult> {
    ensure_non_negative("monthly_deposit", input.monthly_deposit)?;
    ensure_non_negative("annual_rate_percent", input.annual_rate_percent)?;
    let months = ensure_periods("months", input.months)?;

    let quarterly = CompoundingFrequency::Quarterly.periodic_rate(input.annual_rate_percent);
    let monthly_equivalent = (1.0 + quarterly).powf(1.0 / 3.0) - 1.0;

    let result = FlowSimulator::new(SimulationConfig {
        direction: FlowDirection::Contribution,
        timing: FlowTiming::BeginningOfPeriod,
        initial_corpus: 0.0,
        flow_amount: input.monthly_deposit,
        periodic_rate: monthly_equivalent,
        periods: months,
        step_up: None,
    })?
    .run();

    Ok(RecurringDepositResult {
        total_deposited: result.total_flows,
        maturity_amount: result.final_value,
        total_interest: result.total_returns,
        schedule: result.rows,
    })
}
