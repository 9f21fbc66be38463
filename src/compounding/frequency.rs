//! Compounding frequencies used by deposit products

use serde::{Deserialize, Serialize};

/// How often interest is credited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundingFrequency {
    Monthly,
    Quarterly,
    HalfYearly,
    Yearly,
}

impl CompoundingFrequency {
    /// Number of compounding periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::HalfYearly => 2,
            CompoundingFrequency::Yearly => 1,
        }
    }

    /// Per-period rate (decimal) for an annual rate quoted in percent
    pub fn periodic_rate(&self, annual_rate_percent: f64) -> f64 {
        annual_rate_percent / 100.0 / self.periods_per_year() as f64
    }
}

impl Default for CompoundingFrequency {
    fn default() -> Self {
        // Indian bank deposits credit quarterly
        CompoundingFrequency::Quarterly
    }
}

/// Monthly rate (decimal) for an annual rate quoted in percent
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 12.0 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periodic_rate() {
        assert!((CompoundingFrequency::Quarterly.periodic_rate(8.0) - 0.02).abs() < 1e-12);
        assert!((CompoundingFrequency::Yearly.periodic_rate(8.0) - 0.08).abs() < 1e-12);
        assert!((monthly_rate(12.0) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&CompoundingFrequency::HalfYearly).unwrap();
        assert_eq!(json, "\"half_yearly\"");
    }
}
