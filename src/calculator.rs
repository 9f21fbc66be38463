//! Common interface over every calculator input
//!
//! Each input record knows how to compute its own result. Calculators hold no
//! state, so any number of them can be evaluated concurrently.

use crate::deposits::{
    calculate_fixed_deposit, calculate_lumpsum, calculate_recurring_deposit, FixedDepositInput,
    FixedDepositResult, LumpsumInput, LumpsumResult, RecurringDepositInput, RecurringDepositResult,
};
use crate::error::CalcResult;
use crate::flows::{calculate_sip, calculate_swp, SipInput, SipResult, SwpInput, SwpResult};
use crate::irr::{calculate_irr, calculate_xirr, IrrInput, IrrResult, XirrInput, XirrResult};
use crate::loans::{calculate_loan, LoanInput, LoanResult};
use crate::ratios::{
    calculate_capacity_utilization, calculate_dilution, calculate_roi, calculate_training_roi,
    calculate_turnover_cost, calculate_valuation, CapacityInput, CapacityResult, DilutionInput,
    DilutionResult, MultipleTable, RoiInput, RoiResult, TrainingRoiInput, TrainingRoiResult,
    TurnoverInput, TurnoverResult, ValuationInput, ValuationResult,
};

/// A calculator input that can produce its result
pub trait Calculator: Sync {
    type Output: Send;

    /// Short identifier, matching the request tag
    fn name(&self) -> &'static str;

    /// Validate the input and compute the result
    fn calculate(&self) -> CalcResult<Self::Output>;
}

macro_rules! impl_calculator {
    ($input:ty, $output:ty, $name:literal, $func:path) => {
        impl Calculator for $input {
            type Output = $output;

            fn name(&self) -> &'static str {
                $name
            }

            fn calculate(&self) -> CalcResult<Self::Output> {
                $func(self)
            }
        }
    };
}

impl_calculator!(SipInput, SipResult, "sip", calculate_sip);
impl_calculator!(SwpInput, SwpResult, "swp", calculate_swp);
impl_calculator!(LumpsumInput, LumpsumResult, "lumpsum", calculate_lumpsum);
impl_calculator!(FixedDepositInput, FixedDepositResult, "fixed_deposit", calculate_fixed_deposit);
impl_calculator!(
    RecurringDepositInput,
    RecurringDepositResult,
    "recurring_deposit",
    calculate_recurring_deposit
);
impl_calculator!(LoanInput, LoanResult, "loan", calculate_loan);
impl_calculator!(IrrInput, IrrResult, "irr", calculate_irr);
impl_calculator!(XirrInput, XirrResult, "xirr", calculate_xirr);
impl_calculator!(RoiInput, RoiResult, "roi", calculate_roi);
impl_calculator!(DilutionInput, DilutionResult, "dilution", calculate_dilution);
impl_calculator!(TurnoverInput, TurnoverResult, "turnover_cost", calculate_turnover_cost);
impl_calculator!(TrainingRoiInput, TrainingRoiResult, "training_roi", calculate_training_roi);
impl_calculator!(
    CapacityInput,
    CapacityResult,
    "capacity_utilization",
    calculate_capacity_utilization
);

/// Uses the built-in multiple table
impl Calculator for ValuationInput {
    type Output = ValuationResult;

    fn name(&self) -> &'static str {
        "valuation"
    }

    fn calculate(&self) -> CalcResult<Self::Output> {
        calculate_valuation(self, &MultipleTable::default())
    }
}
