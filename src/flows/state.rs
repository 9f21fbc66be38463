//! Running state of a flow simulation

use super::engine::{SimulationConfig, StepUp};

/// State of the corpus at a point in time during simulation
#[derive(Debug, Clone)]
pub struct FlowState {
    /// Current period (1-indexed once simulation starts)
    pub period: u32,

    /// Corpus after the most recent period
    pub corpus: f64,

    /// Flow scheduled for the current period (after any step-up)
    pub flow_amount: f64,

    /// Sum of flows actually applied so far
    pub total_flows: f64,

    /// Sum of growth credited so far
    pub total_growth: f64,

    /// Period at which a withdrawal plan ran the corpus to zero
    pub exhausted_at: Option<u32>,
}

impl FlowState {
    /// Initialize state before the first period
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            period: 0,
            corpus: config.initial_corpus,
            flow_amount: config.flow_amount,
            total_flows: 0.0,
            total_growth: 0.0,
            exhausted_at: None,
        }
    }

    /// Advance to next period, applying a step-up jump on interval boundaries
    pub fn advance_period(&mut self, step_up: Option<&StepUp>) {
        self.period += 1;

        if let Some(step) = step_up {
            if step.applies_at(self.period) {
                self.flow_amount *= 1.0 + step.percent / 100.0;
            }
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted_at.is_some()
    }
}
