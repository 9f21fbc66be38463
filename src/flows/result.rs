//! Output structures for flow simulations

use serde::{Deserialize, Serialize};

use super::engine::FlowDirection;

/// A single simulated period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRow {
    /// Period number (1-indexed)
    pub period: u32,

    /// Contribution or withdrawal actually applied
    pub flow: f64,

    /// Interest or return credited
    pub growth: f64,

    /// Corpus at the end of the period
    pub value: f64,
}

/// Complete simulation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowResult {
    pub direction: FlowDirection,

    pub initial_corpus: f64,

    /// Per-period rows
    pub rows: Vec<PeriodRow>,

    /// Sum of all contributions or withdrawals
    pub total_flows: f64,

    /// Growth component only
    pub total_returns: f64,

    pub final_value: f64,

    /// Period at which a withdrawal plan emptied the corpus
    pub exhausted_at: Option<u32>,
}

impl FlowResult {
    pub fn new(direction: FlowDirection, initial_corpus: f64) -> Self {
        Self {
            direction,
            initial_corpus,
            rows: Vec::new(),
            total_flows: 0.0,
            total_returns: 0.0,
            final_value: initial_corpus,
            exhausted_at: None,
        }
    }

    /// Add a period row
    pub fn add_row(&mut self, row: PeriodRow) {
        self.rows.push(row);
    }

    /// Contributions count positive and withdrawals negative
    pub fn net_flows(&self) -> f64 {
        match self.direction {
            FlowDirection::Contribution => self.total_flows,
            FlowDirection::Withdrawal => -self.total_flows,
        }
    }

    /// Collapse rows into one row per `periods_per_year` (for yearly charts)
    pub fn yearly_rows(&self, periods_per_year: u32) -> Vec<PeriodRow> {
        let chunk = periods_per_year.max(1) as usize;

        self.rows
            .chunks(chunk)
            .enumerate()
            .map(|(idx, rows)| PeriodRow {
                period: idx as u32 + 1,
                flow: rows.iter().map(|r| r.flow).sum(),
                growth: rows.iter().map(|r| r.growth).sum(),
                value: rows.last().map(|r| r.value).unwrap_or(self.initial_corpus),
            })
            .collect()
    }
}
