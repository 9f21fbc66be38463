//! Single-shot business ratio calculators
//!
//! Each calculator applies one closed-form formula. Zero denominators are
//! rejected with [`CalcError::ZeroDenominator`](crate::CalcError) rather than
//! producing Infinity or NaN.

mod capacity;
mod dilution;
mod roi;
pub mod valuation;
mod workforce;

pub use capacity::{calculate_capacity_utilization, CapacityInput, CapacityResult, UtilizationBand};
pub use dilution::{calculate_dilution, dilute_rounds, DilutionInput, DilutionResult, FundingRound, RoundOutcome};
pub use roi::{calculate_roi, payback_period, RoiInput, RoiResult};
pub use valuation::{
    calculate_valuation, implied_multiple, Industry, MultipleTable, ValuationInput,
    ValuationMetric, ValuationResult,
};
pub use workforce::{
    calculate_training_roi, calculate_turnover_cost, TrainingRoiInput, TrainingRoiResult,
    TurnoverInput, TurnoverResult,
};
