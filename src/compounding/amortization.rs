//! Amortization schedule for level-payment loans

use serde::{Deserialize, Serialize};

use super::amortized_payment;
use crate::error::CalcResult;

/// One period of a loan schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Period number (1-indexed)
    pub period: u32,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    /// Outstanding balance after this period's payment
    pub balance: f64,
}

/// Per-year roll-up of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySummary {
    /// Year number (1-indexed)
    pub year: u32,
    pub total_payment: f64,
    pub total_interest: f64,
    pub total_principal: f64,
    pub closing_balance: f64,
}

/// Complete amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub principal: f64,
    pub periodic_rate: f64,
    /// Level payment for every period except possibly the last
    pub payment: f64,
    pub rows: Vec<AmortizationRow>,
}

impl AmortizationSchedule {
    /// Peel the loan off one period at a time
    ///
    /// The last period retires whatever balance remains so the schedule closes
    /// at exactly zero regardless of accumulated rounding.
    pub fn generate(principal: f64, periodic_rate: f64, num_periods: u32) -> CalcResult<Self> {
        let payment = amortized_payment(principal, periodic_rate, num_periods)?;

        let mut rows = Vec::with_capacity(num_periods as usize);
        let mut balance = principal;

        for period in 1..=num_periods {
            let interest = balance * periodic_rate;

            let (principal_part, period_payment) = if period == num_periods {
                (balance, balance + interest)
            } else {
                (payment - interest, payment)
            };

            balance -= principal_part;
            if period == num_periods {
                balance = 0.0;
            }

            rows.push(AmortizationRow {
                period,
                payment: period_payment,
                interest,
                principal: principal_part,
                balance,
            });
        }

        Ok(Self {
            principal,
            periodic_rate,
            payment,
            rows,
        })
    }

    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.interest).sum()
    }

    pub fn total_payment(&self) -> f64 {
        self.rows.iter().map(|r| r.payment).sum()
    }

    pub fn total_principal(&self) -> f64 {
        self.rows.iter().map(|r| r.principal).sum()
    }

    /// Roll periods into years of `periods_per_year` rows each
    ///
    /// A trailing partial year is reported as its own entry.
    pub fn yearly_summary(&self, periods_per_year: u32) -> Vec<YearlySummary> {
        let chunk = periods_per_year.max(1) as usize;

        self.rows
            .chunks(chunk)
            .enumerate()
            .map(|(idx, rows)| YearlySummary {
                year: idx as u32 + 1,
                total_payment: rows.iter().map(|r| r.payment).sum(),
                total_interest: rows.iter().map(|r| r.interest).sum(),
                total_principal: rows.iter().map(|r| r.principal).sum(),
                closing_balance: rows.last().map(|r| r.balance).unwrap_or(0.0),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_schedule_closes_at_zero() {
        for &(principal, rate, n) in &[
            (3_000_000.0, 0.085 / 12.0, 240u32),
            (500_000.0, 0.14 / 12.0, 36),
            (75_000.0, 0.0, 18),
            (1.0, 0.2, 1),
        ] {
            let schedule = AmortizationSchedule::generate(principal, rate, n).unwrap();
            assert_eq!(schedule.rows.len(), n as usize);
            assert_eq!(schedule.rows.last().unwrap().balance, 0.0);
            assert_relative_eq!(schedule.total_principal(), principal, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_first_row_split() {
        let schedule = AmortizationSchedule::generate(100_000.0, 0.01, 12).unwrap();
        let first = &schedule.rows[0];
        assert_relative_eq!(first.interest, 1000.0);
        assert_relative_eq!(first.principal, schedule.payment - 1000.0);
        assert_relative_eq!(first.balance, 100_000.0 - first.principal);
    }

    #[test]
    fn test_interest_declines_over_time() {
        let schedule = AmortizationSchedule::generate(1_000_000.0, 0.0075, 120).unwrap();
        for pair in schedule.rows.windows(2) {
            assert!(pair[1].interest < pair[0].interest);
            assert!(pair[1].balance < pair[0].balance);
        }
    }

    #[test]
    fn test_yearly_summary() {
        let schedule = AmortizationSchedule::generate(240_000.0, 0.0, 30).unwrap();
        let years = schedule.yearly_summary(12);
        assert_eq!(years.len(), 3);
        assert_relative_eq!(years[0].total_principal, 96_000.0);
        assert_relative_eq!(years[0].closing_balance, 144_000.0);
        assert_relative_eq!(years[2].total_principal, 48_000.0);
        assert_eq!(years[2].closing_balance, 0.0);
    }
}
