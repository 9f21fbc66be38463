//! Equated Monthly Installment and repayment schedule

use log::debug;
use serde::{Deserialize, Serialize};

use crate::compounding::{amortized_payment, monthly_rate, AmortizationRow, AmortizationSchedule, YearlySummary};
use crate::error::{checked_periods, ensure_non_negative, ensure_periods, CalcError, CalcResult};
use crate::irr::{annualize, solve_irr, SolverConfig};

/// Loan product, used for labelling only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanKind {
    #[default]
    Home,
    Business,
    Personal,
    Vehicle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    #[serde(default)]
    pub kind: LoanKind,

    pub principal: f64,

    /// Annual interest rate, in percent
    pub annual_rate_percent: f64,

    pub tenure_months: u32,

    /// Upfront fee deducted from the disbursed amount, in percent of principal
    #[serde(default)]
    pub processing_fee_percent: f64,
}

impl LoanInput {
    /// Loan with tenure given in whole years
    pub fn with_years(
        kind: LoanKind,
        principal: f64,
        annual_rate_percent: f64,
        years: u32,
    ) -> CalcResult<Self> {
        Ok(Self {
            kind,
            principal,
            annual_rate_percent,
            tenure_months: checked_periods("years", years, 12)?,
            processing_fee_percent: 0.0,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanResult {
    pub kind: LoanKind,
    pub monthly_emi: f64,
    pub total_interest: f64,
    pub total_payment: f64,
    pub processing_fee: f64,
    /// Annual cost including the processing fee, in percent
    ///
    /// `None` when the solver cannot find a rate (e.g. a fee equal to the
    /// whole principal).
    pub effective_annual_rate_percent: Option<f64>,
    pub schedule: Vec<AmortizationRow>,
    pub yearly: Vec<YearlySummary>,
}

/// Monthly EMI for a principal, annual rate in percent and tenure in months
pub fn emi(principal: f64, annual_rate_percent: f64, tenure_months: u32) -> CalcResult<f64> {
    ensure_non_negative("annual_rate_percent", annual_rate_percent)?;
    amortized_payment(principal, monthly_rate(annual_rate_percent), tenure_months)
}

/// EMI, interest totals and the month-by-month schedule
pub fn calculate_loan(input: &LoanInput) -> CalcResult<LoanResult> {
    ensure_non_negative("principal", input.principal)?;
    ensure_non_negative("annual_rate_percent", input.annual_rate_percent)?;
    ensure_non_negative("processing_fee_percent", input.processing_fee_percent)?;
    let months = ensure_periods("tenure_months", input.tenure_months)?;

    if input.processing_fee_percent > 100.0 {
        return Err(CalcError::invalid_input(
            "processing_fee_percent",
            "cannot exceed 100% of the principal",
        ));
    }

    let schedule = AmortizationSchedule::generate(
        input.principal,
        monthly_rate(input.annual_rate_percent),
        months,
    )?;

    let processing_fee = input.principal * input.processing_fee_percent / 100.0;
    let effective_annual_rate_percent = effective_rate(&schedule, input.principal - processing_fee)?;

    debug!(
        "{:?} loan of {:.2} over {} months: emi={:.2}",
        input.kind, input.principal, months, schedule.payment
    );

    let yearly = schedule.yearly_summary(12);

    Ok(LoanResult {
        kind: input.kind,
        monthly_emi: schedule.payment,
        total_interest: schedule.total_interest(),
        total_payment: schedule.total_payment(),
        processing_fee,
        effective_annual_rate_percent,
        yearly,
        schedule: schedule.rows,
    })
}

/// IRR of the borrower's flows: net disbursal in, installments out
fn effective_rate(schedule: &AmortizationSchedule, net_disbursal: f64) -> CalcResult<Option<f64>> {
    let mut flows = Vec::with_capacity(schedule.rows.len() + 1);
    flows.push(net_disbursal);
    flows.extend(schedule.rows.iter().map(|r| -r.payment));

    let monthly = solve_irr(&flows, &SolverConfig::default())?;
    Ok(monthly.map(|r| annualize(r, 12) * 100.0))
}
