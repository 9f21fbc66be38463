//! Capacity utilization

use serde::{Deserialize, Serialize};

use crate::error::{ensure_denominator, ensure_non_negative, CalcResult};

/// Below this utilization (percent) capacity is considered idle
const OPTIMAL_LOWER: f64 = 70.0;

/// Above this utilization (percent) the operation is considered stretched
const OPTIMAL_UPPER: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationBand {
    Under,
    Optimal,
    Over,
}

impl UtilizationBand {
    pub fn from_percent(utilization_percent: f64) -> Self {
        if utilization_percent < OPTIMAL_LOWER {
            UtilizationBand::Under
        } else if utilization_percent <= OPTIMAL_UPPER {
            UtilizationBand::Optimal
        } else {
            UtilizationBand::Over
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityInput {
    pub actual_output: f64,
    pub max_capacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityResult {
    pub utilization_percent: f64,
    /// Unused capacity; negative when output exceeds rated capacity
    pub spare_capacity: f64,
    pub band: UtilizationBand,
}

pub fn calculate_capacity_utilization(input: &CapacityInput) -> CalcResult<CapacityResult> {
    let max = ensure_denominator("max_capacity", input.max_capacity)?;
    let actual = ensure_non_negative("actual_output", input.actual_output)?;

    let utilization_percent = actual / max * 100.0;

    Ok(CapacityResult {
        utilization_percent,
        spare_capacity: max - actual,
        band: UtilizationBand::from_percent(utilization_percent),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_utilization() {
        let result = calculate_capacity_utilization(&CapacityInput {
            actual_output: 8_500.0,
            max_capacity: 10_000.0,
        })
        .unwrap();

        assert_relative_eq!(result.utilization_percent, 85.0);
        assert_relative_eq!(result.spare_capacity, 1_500.0);
        assert_eq!(result.band, UtilizationBand::Optimal);
    }

    #[test]
    fn test_bands() {
        assert_eq!(UtilizationBand::from_percent(45.0), UtilizationBand::Under);
        assert_eq!(UtilizationBand::from_percent(70.0), UtilizationBand::Optimal);
        assert_eq!(UtilizationBand::from_percent(90.0), UtilizationBand::Optimal);
        assert_eq!(UtilizationBand::from_percent(104.0), UtilizationBand::Over);
    }

    #[test]
    fn test_zero_capacity() {
        assert!(calculate_capacity_utilization(&CapacityInput {
            actual_output: 10.0,
            max_capacity: 0.0,
        })
        .is_err());
    }
}
