//! Valuation from industry multiples
//!
//! The built-in table carries indicative multiples by industry; a custom table
//! can be loaded from CSV with `industry,metric,multiple` columns.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_denominator, ensure_non_negative, CalcError, CalcResult};

/// Spread applied either side of the point valuation
const RANGE_SPREAD: f64 = 0.20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Technology,
    Healthcare,
    Retail,
    Manufacturing,
    FinancialServices,
    RealEstate,
    Energy,
}

impl Industry {
    pub const ALL: [Industry; 7] = [
        Industry::Technology,
        Industry::Healthcare,
        Industry::Retail,
        Industry::Manufacturing,
        Industry::FinancialServices,
        Industry::RealEstate,
        Industry::Energy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Technology => "technology",
            Industry::Healthcare => "healthcare",
            Industry::Retail => "retail",
            Industry::Manufacturing => "manufacturing",
            Industry::FinancialServices => "financial_services",
            Industry::RealEstate => "real_estate",
            Industry::Energy => "energy",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|i| i.as_str() == s.trim())
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Financial metric the multiple is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationMetric {
    Revenue,
    Ebitda,
    NetIncome,
}

impl ValuationMetric {
    pub const ALL: [ValuationMetric; 3] = [
        ValuationMetric::Revenue,
        ValuationMetric::Ebitda,
        ValuationMetric::NetIncome,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ValuationMetric::Revenue => "revenue",
            ValuationMetric::Ebitda => "ebitda",
            ValuationMetric::NetIncome => "net_income",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.as_str() == s.trim())
    }
}

impl fmt::Display for ValuationMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Multiples keyed by industry and metric
#[derive(Debug, Clone)]
pub struct MultipleTable {
    multiples: HashMap<(Industry, ValuationMetric), f64>,
}

impl MultipleTable {
    /// Indicative multiples (revenue, EBITDA, net income) per industry
    pub fn default_multiples() -> Self {
        let rows: [(Industry, [f64; 3]); 7] = [
            (Industry::Technology, [6.0, 15.0, 25.0]),
            (Industry::Healthcare, [4.0, 12.0, 20.0]),
            (Industry::Retail, [1.0, 8.0, 15.0]),
            (Industry::Manufacturing, [1.5, 8.0, 14.0]),
            (Industry::FinancialServices, [3.0, 10.0, 12.0]),
            (Industry::RealEstate, [5.0, 14.0, 18.0]),
            (Industry::Energy, [1.2, 6.0, 10.0]),
        ];

        let mut multiples = HashMap::new();
        for (industry, values) in rows {
            for (metric, value) in ValuationMetric::ALL.iter().zip(values) {
                multiples.insert((industry, *metric), value);
            }
        }

        Self { multiples }
    }

    /// Load a table from a CSV file
    pub fn from_csv_path(path: &Path) -> CalcResult<Self> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Load a table from any CSV source with `industry,metric,multiple` headers
    pub fn from_csv_reader<R: Read>(reader: R) -> CalcResult<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let mut multiples = HashMap::new();

        for result in reader.deserialize() {
            let row: CsvRow = result?;

            let industry = Industry::parse(&row.industry).ok_or_else(|| {
                CalcError::TableLoad(format!("Unknown industry: {}", row.industry))
            })?;
            let metric = ValuationMetric::parse(&row.metric).ok_or_else(|| {
                CalcError::TableLoad(format!("Unknown metric: {}", row.metric))
            })?;
            ensure_non_negative("multiple", row.multiple)?;

            multiples.insert((industry, metric), row.multiple);
        }

        Ok(Self { multiples })
    }

    pub fn get(&self, industry: Industry, metric: ValuationMetric) -> Option<f64> {
        self.multiples.get(&(industry, metric)).copied()
    }

    pub fn len(&self) -> usize {
        self.multiples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.multiples.is_empty()
    }
}

impl Default for MultipleTable {
    fn default() -> Self {
        Self::default_multiples()
    }
}

/// Raw CSV row
#[derive(Debug, Deserialize)]
struct CsvRow {
    industry: String,
    metric: String,
    multiple: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationInput {
    pub industry: Industry,
    pub metric: ValuationMetric,
    /// Annual value of the chosen metric
    pub metric_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub multiple: f64,
    pub valuation: f64,
    pub low_valuation: f64,
    pub high_valuation: f64,
}

/// `valuation = metric_value × multiple[industry][metric]`
pub fn calculate_valuation(input: &ValuationInput, table: &MultipleTable) -> CalcResult<ValuationResult> {
    ensure_non_negative("metric_value", input.metric_value)?;

    let multiple = table
        .get(input.industry, input.metric)
        .ok_or_else(|| CalcError::UnknownMultiple {
            industry: input.industry.to_string(),
            metric: input.metric.to_string(),
        })?;

    let valuation = input.metric_value * multiple;

    Ok(ValuationResult {
        multiple,
        valuation,
        low_valuation: valuation * (1.0 - RANGE_SPREAD),
        high_valuation: valuation * (1.0 + RANGE_SPREAD),
    })
}

/// Multiple implied by a known valuation, e.g. from a comparable deal
pub fn implied_multiple(valuation: f64, metric_value: f64) -> CalcResult<f64> {
    ensure_non_negative("valuation", valuation)?;
    let metric_value = ensure_denominator("metric_value", metric_value)?;
    Ok(valuation / metric_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_table_is_complete() {
        let table = MultipleTable::default();
        assert_eq!(table.len(), Industry::ALL.len() * ValuationMetric::ALL.len());
        for industry in Industry::ALL {
            for metric in ValuationMetric::ALL {
                assert!(table.get(industry, metric).is_some());
            }
        }
    }

    #[test]
    fn test_tech_revenue_valuation() {
        let input = ValuationInput {
            industry: Industry::Technology,
            metric: ValuationMetric::Revenue,
            metric_value: 2_500_000.0,
        };
        let result = calculate_valuation(&input, &MultipleTable::default()).unwrap();

        assert_relative_eq!(result.multiple, 6.0);
        assert_relative_eq!(result.valuation, 15_000_000.0);
        assert_relative_eq!(result.low_valuation, 12_000_000.0);
        assert_relative_eq!(result.high_valuation, 18_000_000.0);
    }

    #[test]
    fn test_csv_table() {
        let csv = "industry,metric,multiple\nretail,revenue,0.8\nenergy,ebitda,5.5\n";
        let table = MultipleTable::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(Industry::Retail, ValuationMetric::Revenue), Some(0.8));

        let missing = ValuationInput {
            industry: Industry::Technology,
            metric: ValuationMetric::Revenue,
            metric_value: 1.0,
        };
        assert!(matches!(
            calculate_valuation(&missing, &table),
            Err(CalcError::UnknownMultiple { .. })
        ));
    }

    #[test]
    fn test_csv_table_from_file() {
        let path = std::env::temp_dir().join(format!("multiples_{}.csv", std::process::id()));
        std::fs::write(&path, "industry,metric,multiple\nhealthcare,ebitda,14.5\n").unwrap();

        let table = MultipleTable::from_csv_path(&path);
        std::fs::remove_file(&path).unwrap();

        let table = table.unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(Industry::Healthcare, ValuationMetric::Ebitda), Some(14.5));
    }

    #[test]
    fn test_missing_csv_file() {
        let path = std::env::temp_dir().join("no_such_multiples_table.csv");
        assert!(matches!(
            MultipleTable::from_csv_path(&path),
            Err(CalcError::TableLoad(_))
        ));
    }

    #[test]
    fn test_csv_rejects_unknown_industry() {
        let csv = "industry,metric,multiple\nshipping,revenue,0.8\n";
        assert!(matches!(
            MultipleTable::from_csv_reader(csv.as_bytes()),
            Err(CalcError::TableLoad(_))
        ));
    }

    #[test]
    fn test_implied_multiple() {
        assert_relative_eq!(implied_multiple(12_000_000.0, 1_500_000.0).unwrap(), 8.0);
        assert!(implied_multiple(12_000_000.0, 0.0).is_err());
    }
}
