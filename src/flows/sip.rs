//! Systematic Investment Plan calculator

use serde::{Deserialize, Serialize};

use super::engine::{FlowDirection, FlowSimulator, SimulationConfig, StepUp};
use super::result::PeriodRow;
use crate::compounding::{monthly_rate, FlowTiming};
use crate::error::{checked_periods, ensure_non_negative, ensure_periods, CalcResult};

/// Input for a monthly SIP, optionally stepping up each year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipInput {
    pub monthly_investment: f64,

    /// Expected annual return, in percent
    pub annual_return_percent: f64,

    pub years: u32,

    /// Yearly increase in the monthly investment, in percent
    #[serde(default)]
    pub step_up_percent: f64,
}

/// SIP projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipResult {
    pub total_invested: f64,
    pub estimated_returns: f64,
    pub total_value: f64,
    /// Monthly investment in the final year (equals the input without step-up)
    pub final_monthly_investment: f64,
    /// Month-by-month rows
    pub schedule: Vec<PeriodRow>,
    /// Year-end rows for charting
    pub yearly: Vec<PeriodRow>,
}

/// Project a SIP with contributions at the start of each month
pub fn calculate_sip(input: &SipInput) -> CalcResult<SipResult> {
    ensure_non_negative("monthly_investment", input.monthly_investment)?;
    ensure_non_negative("annual_return_percent", input.annual_return_percent)?;
    ensure_non_negative("step_up_percent", input.step_up_percent)?;
    let years = ensure_periods("years", input.years)?;
    let months = checked_periods("years", years, 12)?;

    let step_up = (input.step_up_percent > 0.0).then(|| StepUp::annual(input.step_up_percent));

    let simulator = FlowSimulator::new(SimulationConfig {
        direction: FlowDirection::Contribution,
        timing: FlowTiming::BeginningOfPeriod,
        initial_corpus: 0.0,
        flow_amount: input.monthly_investment,
        periodic_rate: monthly_rate(input.annual_return_percent),
        periods: months,
        step_up,
    })?;
    let result = simulator.run();

    let final_monthly_investment = result
        .rows
        .last()
        .map(|r| r.flow)
        .unwrap_or(input.monthly_investment);
    let yearly = result.yearly_rows(12);

    Ok(SipResult {
        total_invested: result.total_flows,
        estimated_returns: result.total_returns,
        total_value: result.final_value,
        final_monthly_investment,
        schedule: result.rows,
        yearly,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn input(step_up_percent: f64) -> SipInput {
        SipInput {
            monthly_investment: 5000.0,
            annual_return_percent: 12.0,
            years: 10,
            step_up_percent,
        }
    }

    #[test]
    fn test_standard_sip() {
        let result = calculate_sip(&input(0.0)).unwrap();

        assert_relative_eq!(result.total_invested, 600_000.0);
        assert_relative_eq!(result.total_value, 1_161_695.0, epsilon = 1.0);
        assert_relative_eq!(result.estimated_returns, 561_695.0, epsilon = 1.0);
        assert_eq!(result.schedule.len(), 120);
        assert_eq!(result.yearly.len(), 10);
        assert_relative_eq!(result.yearly[9].value, result.total_value);
    }

    #[test]
    fn test_step_up_sip() {
        let flat = calculate_sip(&input(0.0)).unwrap();
        let stepped = calculate_sip(&input(10.0)).unwrap();

        // 5000 * 12 * (1.1^10 - 1) / 0.1
        assert_relative_eq!(stepped.total_invested, 956_245.5, epsilon = 1.0);
        assert_relative_eq!(
            stepped.final_monthly_investment,
            5000.0 * 1.1_f64.powi(9),
            max_relative = 1e-9
        );
        assert!(stepped.total_value > flat.total_value);

        // Jump lands exactly on month 13
        assert_eq!(stepped.schedule[11].flow, 5000.0);
        assert_relative_eq!(stepped.schedule[12].flow, 5500.0, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_return() {
        let mut zero = input(0.0);
        zero.annual_return_percent = 0.0;
        let result = calculate_sip(&zero).unwrap();
        assert_relative_eq!(result.total_value, 600_000.0);
        assert_eq!(result.estimated_returns, 0.0);
    }

    #[test]
    fn test_rejects_invalid() {
        let mut bad = input(0.0);
        bad.years = 0;
        assert!(calculate_sip(&bad).is_err());

        let mut bad = input(0.0);
        bad.monthly_investment = -100.0;
        assert!(calculate_sip(&bad).is_err());
    }

    #[test]
    fn test_years_beyond_month_count_rejected() {
        let mut long = input(0.0);
        long.years = 400_000_000;
        assert!(matches!(
            calculate_sip(&long),
            Err(crate::error::CalcError::InvalidInput { ref field, .. }) if field == "years"
        ));
    }
}
