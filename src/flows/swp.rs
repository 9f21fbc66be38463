//! Systematic Withdrawal Plan calculator

use serde::{Deserialize, Serialize};

use super::engine::{FlowDirection, FlowSimulator, SimulationConfig, StepUp};
use super::result::PeriodRow;
use crate::compounding::{monthly_rate, FlowTiming};
use crate::error::{checked_periods, ensure_non_negative, ensure_periods, CalcResult};

/// Input for a monthly SWP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwpInput {
    /// Corpus at the start of the plan
    pub total_investment: f64,

    pub monthly_withdrawal: f64,

    /// Expected annual return, in percent
    pub annual_return_percent: f64,

    pub years: u32,

    /// Yearly increase in the withdrawal, in percent
    #[serde(default)]
    pub step_up_percent: f64,
}

/// SWP projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwpResult {
    pub total_investment: f64,
    pub total_withdrawn: f64,
    /// Growth earned over the plan
    pub total_returns: f64,
    pub final_value: f64,
    /// Month in which the corpus ran out, if it did
    pub exhausted_at_month: Option<u32>,
    pub schedule: Vec<PeriodRow>,
}

impl SwpResult {
    pub fn is_sustainable(&self) -> bool {
        self.exhausted_at_month.is_none()
    }
}

/// Project an SWP with growth credited before each month's withdrawal
///
/// If the corpus cannot cover a withdrawal, the remainder is paid out, the
/// corpus is left at zero and the plan stops in that month.
pub fn calculate_swp(input: &SwpInput) -> CalcResult<SwpResult> {
    ensure_non_negative("total_investment", input.total_investment)?;
    ensure_non_negative("monthly_withdrawal", input.monthly_withdrawal)?;
    ensure_non_negative("annual_return_percent", input.annual_return_percent)?;
    ensure_non_negative("step_up_percent", input.step_up_percent)?;
    let years = ensure_periods("years", input.years)?;
    let months = checked_periods("years", years, 12)?;

    let step_up = (input.step_up_percent > 0.0).then(|| StepUp::annual(input.step_up_percent));

    let simulator = FlowSimulator::new(SimulationConfig {
        direction: FlowDirection::Withdrawal,
        timing: FlowTiming::EndOfPeriod,
        initial_corpus: input.total_investment,
        flow_amount: input.monthly_withdrawal,
        periodic_rate: monthly_rate(input.annual_return_percent),
        periods: months,
        step_up,
    })?;
    let result = simulator.run();

    Ok(SwpResult {
        total_investment: input.total_investment,
        total_withdrawn: result.total_flows,
        total_returns: result.total_returns,
        final_value: result.final_value,
        exhausted_at_month: result.exhausted_at,
        schedule: result.rows,
    })
}
