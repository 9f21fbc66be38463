//! One-time investment compounded annually

use serde::{Deserialize, Serialize};

use crate::compounding::FlowTiming;
use crate::error::{ensure_non_negative, ensure_periods, CalcResult};
use crate::flows::{FlowDirection, FlowSimulator, PeriodRow, SimulationConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LumpsumInput {
    pub investment: f64,
    /// Expected annual return, in percent
    pub annual_return_percent: f64,
    pub years: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LumpsumResult {
    pub invested: f64,
    pub estimated_returns: f64,
    pub total_value: f64,
    /// Year-end values
    pub yearly: Vec<PeriodRow>,
}

pub fn calculate_lumpsum(input: &LumpsumInput) -> CalcResult<LumpsumResult> {
    ensure_non_negative("investment", input.investment)?;
    ensure_non_negative("annual_return_percent", input.annual_return_percent)?;
    let years = ensure_periods("years", input.years)?;

    let result = FlowSimulator::new(SimulationConfig {
        direction: FlowDirection::Contribution,
        timing: FlowTiming::EndOfPeriod,
        initial_corpus: input.investment,
        flow_amount: 0.0,
        periodic_rate: input.annual_return_percent / 100.0,
        periods: years,
        step_up: None,
    })?
    .run();

    Ok(LumpsumResult {
        invested: input.investment,
        estimated_returns: result.total_returns,
        total_value: result.final_value,
        yearly: result.rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compounding::compounded_value;
    use approx::assert_relative_eq;

    #[test]
    fn test_lumpsum() {
        let input = LumpsumInput {
            investment: 100_000.0,
            annual_return_percent: 12.0,
            years: 10,
        };
        let result = calculate_lumpsum(&input).unwrap();

        let expected = compounded_value(100_000.0, 0.12, 10).unwrap();
        assert_relative_eq!(result.total_value, expected, max_relative = 1e-12);
        assert_relative_eq!(result.total_value, 310_584.82, epsilon = 0.01);
        assert_relative_eq!(result.estimated_returns, expected - 100_000.0, max_relative = 1e-9);
        assert_eq!(result.yearly.len(), 10);
        assert!(result.yearly.iter().all(|r| r.flow == 0.0));
    }
}
