//! XIRR over irregularly dated cash flows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::solver::{solve_rate, SolverConfig};
use crate::error::{ensure_finite, CalcError, CalcResult};

/// Day count used to turn elapsed days into years
const DAYS_PER_YEAR: f64 = 365.0;

/// A cash flow with a date and amount
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedCashFlow {
    pub date: NaiveDate,
    /// Positive = inflow, negative = outflow
    pub amount: f64,
}

impl DatedCashFlow {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }
}

/// Years from the first flow's date to each flow's date
fn year_fractions(flows: &[DatedCashFlow]) -> Vec<f64> {
    let base = flows.first().map(|cf| cf.date);
    flows
        .iter()
        .map(|cf| match base {
            Some(base) => (cf.date - base).num_days() as f64 / DAYS_PER_YEAR,
            None => 0.0,
        })
        .collect()
}

/// Annual rate zeroing the date-weighted NPV
///
/// Each flow is discounted by `(1 + r)^((date − first_date) / 365)`.
pub fn solve_xirr(flows: &[DatedCashFlow], config: &SolverConfig) -> CalcResult<Option<f64>> {
    let amounts: Vec<f64> = flows.iter().map(|cf| cf.amount).collect();
    solve_rate(&amounts, &year_fractions(flows), config)
}

/// Date-weighted net present value at an annual rate
pub fn xnpv(rate: f64, flows: &[DatedCashFlow]) -> CalcResult<f64> {
    ensure_finite("rate", rate)?;
    if rate <= -1.0 {
        return Err(CalcError::invalid_input("rate", "must be greater than -100%"));
    }

    Ok(flows
        .iter()
        .zip(year_fractions(flows))
        .map(|(cf, years)| cf.amount / (1.0 + rate).powf(years))
        .sum())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XirrInput {
    pub cash_flows: Vec<DatedCashFlow>,
    #[serde(default)]
    pub solver: SolverConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XirrResult {
    /// Annualised rate, in percent
    pub xirr_percent: Option<f64>,
    pub total_invested: f64,
    pub total_returned: f64,
    /// Days between the first and last flow
    pub holding_days: i64,
}

pub fn calculate_xirr(input: &XirrInput) -> CalcResult<XirrResult> {
    let rate = solve_xirr(&input.cash_flows, &input.solver)?;

    let total_invested = input
        .cash_flows
        .iter()
        .filter(|cf| cf.amount < 0.0)
        .map(|cf| -cf.amount)
        .sum();
    let total_returned = input
        .cash_flows
        .iter()
        .filter(|cf| cf.amount > 0.0)
        .map(|cf| cf.amount)
        .sum();

    let first = input.cash_flows.iter().map(|cf| cf.date).min();
    let last = input.cash_flows.iter().map(|cf| cf.date).max();
    let holding_days = match (first, last) {
        (Some(first), Some(last)) => (last - first).num_days(),
        _ => 0,
    };

    Ok(XirrResult {
        xirr_percent: rate.map(|r| r * 100.0),
        total_invested,
        total_returned,
        holding_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_one_year_xirr() {
        let flows = vec![
            DatedCashFlow::new(date(2023, 1, 1), -1000.0),
            DatedCashFlow::new(date(2024, 1, 1), 1100.0),
        ];

        let xirr = solve_xirr(&flows, &SolverConfig::default()).unwrap().unwrap();
        assert_relative_eq!(xirr, 0.10, epsilon = 1e-6);
    }

    #[test]
    fn test_dates_matter() {
        // Same amounts, but the return arrives after half a year
        let flows = vec![
            DatedCashFlow::new(date(2023, 1, 1), -1000.0),
            DatedCashFlow::new(date(2023, 7, 2), 1100.0),
        ];

        let xirr = solve_xirr(&flows, &SolverConfig::default()).unwrap().unwrap();
        let years = 182.0 / 365.0;
        assert_relative_eq!(xirr, 1.1_f64.powf(1.0 / years) - 1.0, epsilon = 1e-6);
        assert!(xirr > 0.2);
    }

    #[test]
    fn test_xnpv_zero_at_xirr() {
        let flows = vec![
            DatedCashFlow::new(date(2023, 1, 1), -1000.0),
            DatedCashFlow::new(date(2023, 6, 1), -500.0),
            DatedCashFlow::new(date(2024, 1, 1), 1700.0),
        ];

        let xirr = solve_xirr(&flows, &SolverConfig::default()).unwrap().unwrap();
        assert!(xirr > 0.10 && xirr < 0.20);
        assert_relative_eq!(xnpv(xirr, &flows).unwrap(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_negative_return() {
        let flows = vec![
            DatedCashFlow::new(date(2023, 1, 1), -1000.0),
            DatedCashFlow::new(date(2024, 1, 1), 900.0),
        ];
        let xirr = solve_xirr(&flows, &SolverConfig::default()).unwrap().unwrap();
        assert_relative_eq!(xirr, -0.10, epsilon = 1e-6);
    }

    #[test]
    fn test_insufficient_and_same_sign() {
        let single = vec![DatedCashFlow::new(date(2023, 1, 1), -1000.0)];
        assert!(solve_xirr(&single, &SolverConfig::default()).is_err());

        let outflows = vec![
            DatedCashFlow::new(date(2023, 1, 1), -1000.0),
            DatedCashFlow::new(date(2024, 1, 1), -500.0),
        ];
        assert_eq!(solve_xirr(&outflows, &SolverConfig::default()), Ok(None));
    }

    #[test]
    fn test_calculate_xirr_from_json() {
        let json = r#"{
            "cash_flows": [
                {"date": "2022-04-01", "amount": -10000},
                {"date": "2023-04-01", "amount": -10000},
                {"date": "2024-04-01", "amount": 23500}
            ]
        }"#;
        let input: XirrInput = serde_json::from_str(json).unwrap();
        let result = calculate_xirr(&input).unwrap();

        assert_relative_eq!(result.total_invested, 20_000.0);
        assert_relative_eq!(result.total_returned, 23_500.0);
        assert_eq!(result.holding_days, 731);
        assert!(result.xirr_percent.unwrap() > 0.0);
    }
}
