//! JSON request/response envelope covering every calculator
//!
//! A front end posts one `CalculationRequest` per input change and renders
//! either the result or the error message, so an invalid or non-convergent
//! calculation shows as "cannot compute" rather than as a wrong number.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::calculator::Calculator;
use crate::deposits::{
    FixedDepositInput, FixedDepositResult, LumpsumInput, LumpsumResult, RecurringDepositInput,
    RecurringDepositResult,
};
use crate::error::CalcResult;
use crate::flows::{SipInput, SipResult, SwpInput, SwpResult};
use crate::irr::{IrrInput, IrrResult, XirrInput, XirrResult};
use crate::loans::{LoanInput, LoanResult};
use crate::ratios::{
    calculate_valuation, CapacityInput, CapacityResult, DilutionInput, DilutionResult,
    MultipleTable, RoiInput, RoiResult, TrainingRoiInput, TrainingRoiResult, TurnoverInput,
    TurnoverResult, ValuationInput, ValuationResult,
};

/// Input for any calculator, tagged by `"calculator"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculationRequest {
    Sip(SipInput),
    Swp(SwpInput),
    Lumpsum(LumpsumInput),
    FixedDeposit(FixedDepositInput),
    RecurringDeposit(RecurringDepositInput),
    Loan(LoanInput),
    Irr(IrrInput),
    Xirr(XirrInput),
    Roi(RoiInput),
    Dilution(DilutionInput),
    Valuation(ValuationInput),
    TurnoverCost(TurnoverInput),
    TrainingRoi(TrainingRoiInput),
    CapacityUtilization(CapacityInput),
}

/// Result of any calculator
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CalculationOutput {
    Sip(SipResult),
    Swp(SwpResult),
    Lumpsum(LumpsumResult),
    FixedDeposit(FixedDepositResult),
    RecurringDeposit(RecurringDepositResult),
    Loan(LoanResult),
    Irr(IrrResult),
    Xirr(XirrResult),
    Roi(RoiResult),
    Dilution(DilutionResult),
    Valuation(ValuationResult),
    TurnoverCost(TurnoverResult),
    TrainingRoi(TrainingRoiResult),
    CapacityUtilization(CapacityResult),
}

/// Response envelope: exactly one of `result` or `error` is set
///
/// A successful response can still carry an undefined rate: IRR and XIRR
/// report `None` when no rate zeroes the NPV, and loans report `None` for
/// the effective rate when the fee leaves nothing to solve. Front ends show
/// these as "cannot compute" rather than as errors.
#[derive(Debug, Clone, Serialize)]
pub struct CalculationResponse {
    pub calculator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<CalculationOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CalculationResponse {
    /// Inputs were valid and a result was produced; solver rates inside it
    /// may still be `None`
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl CalculationRequest {
    /// Identifier of the requested calculator
    pub fn name(&self) -> &'static str {
        match self {
            CalculationRequest::Sip(input) => input.name(),
            CalculationRequest::Swp(input) => input.name(),
            CalculationRequest::Lumpsum(input) => input.name(),
            CalculationRequest::FixedDeposit(input) => input.name(),
            CalculationRequest::RecurringDeposit(input) => input.name(),
            CalculationRequest::Loan(input) => input.name(),
            CalculationRequest::Irr(input) => input.name(),
            CalculationRequest::Xirr(input) => input.name(),
            CalculationRequest::Roi(input) => input.name(),
            CalculationRequest::Dilution(input) => input.name(),
            CalculationRequest::Valuation(input) => input.name(),
            CalculationRequest::TurnoverCost(input) => input.name(),
            CalculationRequest::TrainingRoi(input) => input.name(),
            CalculationRequest::CapacityUtilization(input) => input.name(),
        }
    }

    /// Evaluate with the built-in valuation multiples
    pub fn evaluate(&self) -> CalcResult<CalculationOutput> {
        self.evaluate_with(&MultipleTable::default())
    }

    /// Evaluate, looking valuation multiples up in `table`
    pub fn evaluate_with(&self, table: &MultipleTable) -> CalcResult<CalculationOutput> {
        debug!("Evaluating {} request", self.name());

        Ok(match self {
            CalculationRequest::Sip(input) => CalculationOutput::Sip(input.calculate()?),
            CalculationRequest::Swp(input) => CalculationOutput::Swp(input.calculate()?),
            CalculationRequest::Lumpsum(input) => CalculationOutput::Lumpsum(input.calculate()?),
            CalculationRequest::FixedDeposit(input) => {
                CalculationOutput::FixedDeposit(input.calculate()?)
            }
            CalculationRequest::RecurringDeposit(input) => {
                CalculationOutput::RecurringDeposit(input.calculate()?)
            }
            CalculationRequest::Loan(input) => CalculationOutput::Loan(input.calculate()?),
            CalculationRequest::Irr(input) => CalculationOutput::Irr(input.calculate()?),
            CalculationRequest::Xirr(input) => CalculationOutput::Xirr(input.calculate()?),
            CalculationRequest::Roi(input) => CalculationOutput::Roi(input.calculate()?),
            CalculationRequest::Dilution(input) => CalculationOutput::Dilution(input.calculate()?),
            CalculationRequest::Valuation(input) => {
                CalculationOutput::Valuation(calculate_valuation(input, table)?)
            }
            CalculationRequest::TurnoverCost(input) => {
                CalculationOutput::TurnoverCost(input.calculate()?)
            }
            CalculationRequest::TrainingRoi(input) => {
                CalculationOutput::TrainingRoi(input.calculate()?)
            }
            CalculationRequest::CapacityUtilization(input) => {
                CalculationOutput::CapacityUtilization(input.calculate()?)
            }
        })
    }

    /// Evaluate into a response envelope, never failing
    pub fn respond(&self) -> CalculationResponse {
        self.respond_with(&MultipleTable::default())
    }

    pub fn respond_with(&self, table: &MultipleTable) -> CalculationResponse {
        match self.evaluate_with(table) {
            Ok(output) => CalculationResponse {
                calculator: self.name().to_string(),
                result: Some(output),
                error: None,
            },
            Err(err) => CalculationResponse {
                calculator: self.name().to_string(),
                result: None,
                error: Some(err.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_evaluate_sip() {
        let json = r#"{
            "calculator": "sip",
            "monthly_investment": 5000,
            "annual_return_percent": 12,
            "years": 10
        }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name(), "sip");

        match request.evaluate().unwrap() {
            CalculationOutput::Sip(result) => {
                assert!((result.total_invested - 600_000.0).abs() < 1e-6);
            }
            other => panic!("unexpected output: {:?}", other),
        }
    }

    #[test]
    fn test_error_becomes_response() {
        let json = r#"{
            "calculator": "roi",
            "investment": 0,
            "total_revenue": 150000,
            "total_costs": 20000
        }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        let response = request.respond();

        assert!(!response.is_ok());
        assert!(response.result.is_none());
        assert!(response.error.unwrap().contains("zero denominator"));
    }

    #[test]
    fn test_response_serialization() {
        let request = CalculationRequest::CapacityUtilization(CapacityInput {
            actual_output: 50.0,
            max_capacity: 100.0,
        });
        let json = serde_json::to_value(request.respond()).unwrap();

        assert_eq!(json["calculator"], "capacity_utilization");
        assert_eq!(json["result"]["band"], "under");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_loan_request_with_defaults() {
        let json = r#"{
            "calculator": "loan",
            "principal": 3000000,
            "annual_rate_percent": 8.5,
            "tenure_months": 240
        }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        match request {
            CalculationRequest::Loan(ref input) => {
                assert_eq!(input.processing_fee_percent, 0.0);
            }
            _ => panic!("expected a loan request"),
        }
        assert!(request.respond().is_ok());
    }

    #[test]
    fn test_unknown_calculator_rejected() {
        let json = r#"{"calculator": "horoscope", "sign": "leo"}"#;
        assert!(serde_json::from_str::<CalculationRequest>(json).is_err());
    }
}
