//! Employee turnover cost and training ROI

use serde::{Deserialize, Serialize};

use crate::error::{ensure_denominator, ensure_non_negative, CalcError, CalcResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnoverInput {
    /// Headcount the turnover is measured against
    pub total_employees: f64,
    pub employees_left: f64,
    pub average_salary: f64,
    pub recruitment_cost_per_hire: f64,
    pub training_cost_per_hire: f64,
    /// Productivity lost per leaver, in percent of annual salary
    pub productivity_loss_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnoverResult {
    pub turnover_rate_percent: f64,
    pub direct_cost_per_leaver: f64,
    pub productivity_cost_per_leaver: f64,
    pub cost_per_leaver: f64,
    pub total_cost: f64,
    /// Total cost spread over the whole headcount
    pub cost_per_employee: f64,
}

pub fn calculate_turnover_cost(input: &TurnoverInput) -> CalcResult<TurnoverResult> {
    let headcount = ensure_denominator("total_employees", input.total_employees)?;
    let leavers = ensure_non_negative("employees_left", input.employees_left)?;
    ensure_non_negative("average_salary", input.average_salary)?;
    ensure_non_negative("recruitment_cost_per_hire", input.recruitment_cost_per_hire)?;
    ensure_non_negative("training_cost_per_hire", input.training_cost_per_hire)?;
    ensure_non_negative("productivity_loss_percent", input.productivity_loss_percent)?;

    if leavers > headcount {
        return Err(CalcError::invalid_input(
            "employees_left",
            "cannot exceed total_employees",
        ));
    }

    let direct = input.recruitment_cost_per_hire + input.training_cost_per_hire;
    let productivity = input.average_salary * input.productivity_loss_percent / 100.0;
    let per_leaver = direct + productivity;
    let total_cost = leavers * per_leaver;

    Ok(TurnoverResult {
        turnover_rate_percent: leavers / headcount * 100.0,
        direct_cost_per_leaver: direct,
        productivity_cost_per_leaver: productivity,
        cost_per_leaver: per_leaver,
        total_cost,
        cost_per_employee: total_cost / headcount,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRoiInput {
    pub program_cost: f64,
    pub participants: f64,
    /// Annual productivity gain per participant
    pub productivity_gain_per_participant: f64,
    /// Annual savings from reduced attrition
    #[serde(default)]
    pub retention_savings: f64,
    #[serde(default)]
    pub other_benefits: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRoiResult {
    pub total_benefits: f64,
    pub net_benefit: f64,
    pub roi_percent: f64,
    pub cost_per_participant: f64,
    pub benefit_per_participant: f64,
    /// Months for monthly benefits to cover the program cost
    pub payback_months: Option<f64>,
}

pub fn calculate_training_roi(input: &TrainingRoiInput) -> CalcResult<TrainingRoiResult> {
    let cost = ensure_denominator("program_cost", input.program_cost)?;
    let participants = ensure_denominator("participants", input.participants)?;
    ensure_non_negative(
        "productivity_gain_per_participant",
        input.productivity_gain_per_participant,
    )?;
    ensure_non_negative("retention_savings", input.retention_savings)?;
    ensure_non_negative("other_benefits", input.other_benefits)?;

    let total_benefits = participants * input.productivity_gain_per_participant
        + input.retention_savings
        + input.other_benefits;
    let net_benefit = total_benefits - cost;

    let payback_months = if total_benefits > 0.0 {
        Some(cost / (total_benefits / 12.0))
    } else {
        None
    };

    Ok(TrainingRoiResult {
        total_benefits,
        net_benefit,
        roi_percent: net_benefit / cost * 100.0,
        cost_per_participant: cost / participants,
        benefit_per_participant: total_benefits / participants,
        payback_months,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_turnover_cost() {
        let input = TurnoverInput {
            total_employees: 200.0,
            employees_left: 30.0,
            average_salary: 600_000.0,
            recruitment_cost_per_hire: 50_000.0,
            training_cost_per_hire: 30_000.0,
            productivity_loss_percent: 25.0,
        };
        let result = calculate_turnover_cost(&input).unwrap();

        assert_relative_eq!(result.turnover_rate_percent, 15.0);
        assert_relative_eq!(result.direct_cost_per_leaver, 80_000.0);
        assert_relative_eq!(result.productivity_cost_per_leaver, 150_000.0);
        assert_relative_eq!(result.total_cost, 6_900_000.0);
        assert_relative_eq!(result.cost_per_employee, 34_500.0);
    }

    #[test]
    fn test_turnover_zero_headcount() {
        let input = TurnoverInput {
            total_employees: 0.0,
            employees_left: 0.0,
            average_salary: 600_000.0,
            recruitment_cost_per_hire: 50_000.0,
            training_cost_per_hire: 30_000.0,
            productivity_loss_percent: 25.0,
        };
        assert_eq!(
            calculate_turnover_cost(&input),
            Err(CalcError::zero_denominator("total_employees"))
        );
    }

    #[test]
    fn test_training_roi() {
        let input = TrainingRoiInput {
            program_cost: 500_000.0,
            participants: 25.0,
            productivity_gain_per_participant: 30_000.0,
            retention_savings: 200_000.0,
            other_benefits: 50_000.0,
        };
        let result = calculate_training_roi(&input).unwrap();

        assert_relative_eq!(result.total_benefits, 1_000_000.0);
        assert_relative_eq!(result.net_benefit, 500_000.0);
        assert_relative_eq!(result.roi_percent, 100.0);
        assert_relative_eq!(result.cost_per_participant, 20_000.0);
        assert_relative_eq!(result.benefit_per_participant, 40_000.0);
        assert_relative_eq!(result.payback_months.unwrap(), 6.0);
    }

    #[test]
    fn test_training_zero_cost_is_undefined() {
        let input = TrainingRoiInput {
            program_cost: 0.0,
            participants: 25.0,
            productivity_gain_per_participant: 30_000.0,
            retention_savings: 0.0,
            other_benefits: 0.0,
        };
        assert!(matches!(
            calculate_training_roi(&input),
            Err(CalcError::ZeroDenominator { .. })
        ));
    }
}
