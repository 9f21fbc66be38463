//! Period-by-period simulation of a corpus under recurring flows

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::result::{FlowResult, PeriodRow};
use super::state::FlowState;
use crate::compounding::FlowTiming;
use crate::error::{ensure_non_negative, ensure_periods, CalcError, CalcResult};

/// Whether the recurring flow adds to or draws from the corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowDirection {
    /// SIP-style contribution
    Contribution,
    /// SWP-style withdrawal
    Withdrawal,
}

/// Step-up applied to the flow amount
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepUp {
    /// Increase per interval, in percent
    pub percent: f64,
    /// Periods between increases (12 = annual for monthly flows)
    pub interval: u32,
}

impl StepUp {
    /// Yearly step-up for a monthly flow
    pub fn annual(percent: f64) -> Self {
        Self {
            percent,
            interval: 12,
        }
    }

    /// True on the first period of each new interval (13, 25, ... for annual)
    pub fn applies_at(&self, period: u32) -> bool {
        self.interval > 0 && period > 1 && (period - 1) % self.interval == 0
    }
}

/// Configuration for one simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub direction: FlowDirection,
    pub timing: FlowTiming,
    /// Corpus before the first period
    pub initial_corpus: f64,
    /// Flow for the first period
    pub flow_amount: f64,
    /// Growth rate per period (decimal)
    pub periodic_rate: f64,
    /// Number of periods to simulate
    pub periods: u32,
    pub step_up: Option<StepUp>,
}

impl SimulationConfig {
    fn validate(&self) -> CalcResult<()> {
        ensure_non_negative("initial_corpus", self.initial_corpus)?;
        ensure_non_negative("flow_amount", self.flow_amount)?;
        ensure_non_negative("periodic_rate", self.periodic_rate)?;
        ensure_periods("periods", self.periods)?;

        if let Some(step) = &self.step_up {
            ensure_non_negative("step_up_percent", step.percent)?;
            ensure_periods("step_up_interval", step.interval)?;
        }

        if self.direction == FlowDirection::Withdrawal && self.initial_corpus == 0.0 {
            return Err(CalcError::invalid_input(
                "initial_corpus",
                "a withdrawal plan needs a starting corpus",
            ));
        }

        Ok(())
    }
}

/// Flow simulation engine
pub struct FlowSimulator {
    config: SimulationConfig,
}

impl FlowSimulator {
    /// Create a simulator, rejecting invalid configurations up front
    pub fn new(config: SimulationConfig) -> CalcResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run the simulation to completion or until the corpus is exhausted
    pub fn run(&self) -> FlowResult {
        let mut result = FlowResult::new(self.config.direction, self.config.initial_corpus);
        let mut state = FlowState::from_config(&self.config);

        for _period in 1..=self.config.periods {
            state.advance_period(self.config.step_up.as_ref());

            let row = self.simulate_period(&mut state);
            result.add_row(row);

            if state.is_exhausted() {
                break;
            }
        }

        result.total_flows = state.total_flows;
        result.total_returns = state.total_growth;
        result.final_value = state.corpus;
        result.exhausted_at = state.exhausted_at;

        debug!(
            "Simulated {} periods: flows={:.2} growth={:.2} final={:.2}",
            result.rows.len(),
            result.total_flows,
            result.total_returns,
            result.final_value
        );

        result
    }

    /// Apply one period's flow and growth in the configured order
    fn simulate_period(&self, state: &mut FlowState) -> PeriodRow {
        let rate = self.config.periodic_rate;

        let (flow, growth) = match self.config.timing {
            FlowTiming::BeginningOfPeriod => {
                let flow = self.apply_flow(state);
                let growth = state.corpus * rate;
                state.corpus += growth;
                (flow, growth)
            }
            FlowTiming::EndOfPeriod => {
                let growth = state.corpus * rate;
                state.corpus += growth;
                let flow = self.apply_flow(state);
                (flow, growth)
            }
        };

        state.total_flows += flow;
        state.total_growth += growth;

        PeriodRow {
            period: state.period,
            flow,
            growth,
            value: state.corpus,
        }
    }

    /// Add or withdraw this period's amount, returning what was actually moved
    fn apply_flow(&self, state: &mut FlowState) -> f64 {
        match self.config.direction {
            FlowDirection::Contribution => {
                state.corpus += state.flow_amount;
                state.flow_amount
            }
            FlowDirection::Withdrawal => {
                let requested = state.flow_amount;
                let withdrawn = requested.min(state.corpus);
                state.corpus -= withdrawn;

                if withdrawn < requested || state.corpus <= 0.0 {
                    state.corpus = 0.0;
                    state.exhausted_at = Some(state.period);
                    warn!(
                        "Corpus exhausted at period {} of {} (withdrew {:.2} of {:.2})",
                        state.period, self.config.periods, withdrawn, requested
                    );
                }

                withdrawn
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compounding::annuity_future_value;
    use approx::assert_relative_eq;

    fn contribution(timing: FlowTiming) -> SimulationConfig {
        SimulationConfig {
            direction: FlowDirection::Contribution,
            timing,
            initial_corpus: 0.0,
            flow_amount: 5000.0,
            periodic_rate: 0.01,
            periods: 120,
            step_up: None,
        }
    }

    #[test]
    fn test_matches_closed_form() {
        for timing in [FlowTiming::BeginningOfPeriod, FlowTiming::EndOfPeriod] {
            let result = FlowSimulator::new(contribution(timing)).unwrap().run();
            let expected = annuity_future_value(5000.0, 0.01, 120, timing).unwrap();
            assert_relative_eq!(result.final_value, expected, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_rows_follow_recurrence() {
        let result = FlowSimulator::new(contribution(FlowTiming::EndOfPeriod))
            .unwrap()
            .run();

        let mut prev = 0.0;
        for row in &result.rows {
            assert_relative_eq!(row.value, prev + row.growth + row.flow, max_relative = 1e-12);
            prev = row.value;
        }
    }

    #[test]
    fn test_returns_are_growth_only() {
        let mut config = contribution(FlowTiming::BeginningOfPeriod);
        config.initial_corpus = 20_000.0;
        let result = FlowSimulator::new(config).unwrap().run();

        assert_relative_eq!(
            result.total_returns,
            result.final_value - 20_000.0 - result.total_flows,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_withdrawal_clamps_at_zero() {
        let config = SimulationConfig {
            direction: FlowDirection::Withdrawal,
            timing: FlowTiming::EndOfPeriod,
            initial_corpus: 10_000.0,
            flow_amount: 3000.0,
            periodic_rate: 0.0,
            periods: 12,
            step_up: None,
        };
        let result = FlowSimulator::new(config).unwrap().run();

        assert_eq!(result.exhausted_at, Some(4));
        assert_eq!(result.rows.len(), 4);
        assert_eq!(result.final_value, 0.0);
        assert_relative_eq!(result.rows[3].flow, 1000.0);
        assert_relative_eq!(result.total_flows, 10_000.0);
        assert!(result.rows.iter().all(|r| r.value >= 0.0));
    }

    #[test]
    fn test_withdrawal_needs_corpus() {
        let config = SimulationConfig {
            direction: FlowDirection::Withdrawal,
            timing: FlowTiming::EndOfPeriod,
            initial_corpus: 0.0,
            flow_amount: 3000.0,
            periodic_rate: 0.01,
            periods: 12,
            step_up: None,
        };
        assert!(FlowSimulator::new(config).is_err());
    }

    #[test]
    fn test_invalid_config() {
        let mut config = contribution(FlowTiming::EndOfPeriod);
        config.periods = 0;
        assert!(FlowSimulator::new(config).is_err());

        let mut config = contribution(FlowTiming::EndOfPeriod);
        config.periodic_rate = f64::NAN;
        assert!(FlowSimulator::new(config).is_err());
    }
}
