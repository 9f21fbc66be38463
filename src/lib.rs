//! Wealth Engine - financial calculator library for personal and business finance
//!
//! This library provides:
//! - Compounding, annuity and amortization primitives
//! - SIP and SWP simulation with optional annual step-up
//! - Lumpsum, fixed deposit and recurring deposit maturity
//! - Loan EMI with full amortization schedules
//! - IRR and XIRR via Newton-Raphson
//! - Business ratios: ROI, dilution, valuation multiples, turnover, training ROI,
//!   capacity utilization
//! - Parallel sensitivity sweeps and a JSON request envelope

pub mod calculator;
pub mod compounding;
pub mod deposits;
pub mod error;
pub mod flows;
pub mod irr;
pub mod loans;
pub mod ratios;
pub mod request;
pub mod sensitivity;

// Re-export commonly used types
pub use calculator::Calculator;
pub use compounding::{AmortizationSchedule, CompoundingFrequency, FlowTiming};
pub use error::{CalcError, CalcResult};
pub use flows::{FlowResult, FlowSimulator, SimulationConfig};
pub use irr::{DatedCashFlow, SolverConfig};
pub use request::{CalculationOutput, CalculationRequest, CalculationResponse};
pub use sensitivity::{rate_range, SensitivityRunner};
