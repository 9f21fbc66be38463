//! Lumpsum, fixed deposit and recurring deposit calculators

mod fixed;
mod lumpsum;
mod recurring;

pub use fixed::{calculate_fixed_deposit, FixedDepositInput, FixedDepositResult};
pub use lumpsum::{calculate_lumpsum, LumpsumInput, LumpsumResult};
pub use recurring::{calculate_recurring_deposit, RecurringDepositInput, RecurringDepositResult};
