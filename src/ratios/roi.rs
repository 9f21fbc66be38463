//! Return on investment and payback period

use serde::{Deserialize, Serialize};

use crate::error::{ensure_denominator, ensure_finite, ensure_non_negative, CalcResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiInput {
    pub investment: f64,
    /// Revenue over a year
    pub total_revenue: f64,
    /// Operating costs over the same year, excluding the investment
    pub total_costs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    pub net_profit: f64,
    pub roi_percent: f64,
    /// Months to recover the investment from level monthly benefits
    pub payback_months: Option<f64>,
}

/// `roi = (revenue − costs − investment) / investment × 100`
pub fn calculate_roi(input: &RoiInput) -> CalcResult<RoiResult> {
    let investment = ensure_denominator("investment", input.investment)?;
    ensure_non_negative("total_revenue", input.total_revenue)?;
    ensure_non_negative("total_costs", input.total_costs)?;

    let net_profit = input.total_revenue - input.total_costs - investment;
    let annual_benefit = input.total_revenue - input.total_costs;

    let payback_months = if annual_benefit > 0.0 {
        Some(investment / (annual_benefit / 12.0))
    } else {
        None
    };

    Ok(RoiResult {
        net_profit,
        roi_percent: net_profit / investment * 100.0,
        payback_months,
    })
}

/// First period at which cumulative profit crosses zero
///
/// `period_net_flows[i]` is the net benefit of period `i + 1`. The crossing is
/// interpolated linearly inside the period, so recovering the last 40% of the
/// investment halfway through period 3 yields 2.5. Returns `None` if the
/// investment is never recovered.
pub fn payback_period(investment: f64, period_net_flows: &[f64]) -> CalcResult<Option<f64>> {
    ensure_non_negative("investment", investment)?;
    for &flow in period_net_flows {
        ensure_finite("period_net_flow", flow)?;
    }

    if investment == 0.0 {
        return Ok(Some(0.0));
    }

    let mut cumulative = -investment;
    for (idx, &flow) in period_net_flows.iter().enumerate() {
        let next = cumulative + flow;
        if next >= 0.0 && flow > 0.0 {
            let fraction = -cumulative / flow;
            return Ok(Some(idx as f64 + fraction));
        }
        cumulative = next;
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use approx::assert_relative_eq;

    #[test]
    fn test_roi_identity() {
        let input = RoiInput {
            investment: 100_000.0,
            total_revenue: 150_000.0,
            total_costs: 20_000.0,
        };
        let result = calculate_roi(&input).unwrap();

        assert_relative_eq!(result.net_profit, 30_000.0);
        assert_relative_eq!(result.roi_percent, 30.0);
        // 130000 of annual benefit is 10833.33 a month
        assert_relative_eq!(result.payback_months.unwrap(), 100_000.0 / (130_000.0 / 12.0));
    }

    #[test]
    fn test_zero_investment_is_undefined() {
        let input = RoiInput {
            investment: 0.0,
            total_revenue: 150_000.0,
            total_costs: 20_000.0,
        };
        assert_eq!(
            calculate_roi(&input),
            Err(CalcError::zero_denominator("investment"))
        );
    }

    #[test]
    fn test_loss_has_no_payback() {
        let input = RoiInput {
            investment: 50_000.0,
            total_revenue: 10_000.0,
            total_costs: 15_000.0,
        };
        let result = calculate_roi(&input).unwrap();
        assert!(result.roi_percent < -100.0);
        assert!(result.payback_months.is_none());
    }

    #[test]
    fn test_payback_interpolates() {
        let payback = payback_period(1000.0, &[300.0, 300.0, 800.0]).unwrap();
        assert_relative_eq!(payback.unwrap(), 2.5);
    }

    #[test]
    fn test_payback_with_dip() {
        let payback = payback_period(1000.0, &[500.0, -200.0, 400.0, 600.0]).unwrap();
        // After 3 periods cumulative is -300; period 4 recovers it halfway
        assert_relative_eq!(payback.unwrap(), 3.5);
    }

    #[test]
    fn test_payback_never() {
        assert_eq!(payback_period(1000.0, &[100.0, 100.0]).unwrap(), None);
        assert_eq!(payback_period(0.0, &[]).unwrap(), Some(0.0));
    }
}
