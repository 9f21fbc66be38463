//! Wealth Engine CLI
//!
//! Command-line front end printing calculator results as JSON

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

use wealth_engine::flows::{calculate_sip, calculate_swp, SipInput, SwpInput};
use wealth_engine::irr::{calculate_irr, calculate_xirr, IrrInput, XirrInput};
use wealth_engine::loans::{calculate_loan, LoanInput, LoanKind};
use wealth_engine::ratios::{
    calculate_dilution, calculate_roi, calculate_valuation, DilutionInput, Industry,
    MultipleTable, RoiInput, ValuationInput, ValuationMetric,
};
use wealth_engine::{CalculationRequest, DatedCashFlow, SensitivityRunner, SolverConfig};

#[derive(Parser)]
#[command(name = "wealth_engine")]
#[command(about = "Financial calculators: SIP, SWP, EMI, IRR/XIRR and business ratios")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Maturity value of a monthly SIP
    Sip {
        /// Monthly investment
        #[arg(long)]
        monthly: f64,
        /// Expected annual return, percent
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        years: u32,
        /// Annual step-up of the instalment, percent
        #[arg(long, default_value_t = 0.0)]
        step_up: f64,
        /// Write the monthly schedule to this CSV file
        #[arg(long)]
        schedule_csv: Option<PathBuf>,
    },

    /// Month-by-month balance of a systematic withdrawal plan
    Swp {
        /// Starting corpus
        #[arg(long)]
        corpus: f64,
        /// Monthly withdrawal
        #[arg(long)]
        withdrawal: f64,
        /// Expected annual return, percent
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        years: u32,
        #[arg(long, default_value_t = 0.0)]
        step_up: f64,
        #[arg(long)]
        schedule_csv: Option<PathBuf>,
    },

    /// Loan EMI with amortization schedule
    Emi {
        /// home, business, personal or vehicle
        #[arg(long, default_value = "home", value_parser = parse_loan_kind)]
        kind: LoanKind,
        #[arg(long)]
        principal: f64,
        /// Annual interest rate, percent
        #[arg(long)]
        rate: f64,
        /// Tenure in months
        #[arg(long)]
        months: u32,
        /// Processing fee, percent of principal
        #[arg(long, default_value_t = 0.0)]
        fee: f64,
        #[arg(long)]
        schedule_csv: Option<PathBuf>,
    },

    /// IRR of evenly spaced cash flows
    Irr {
        /// Comma-separated flows, outlay first (e.g. -1000,300,400,500)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        flows: Vec<f64>,
        #[arg(long, default_value_t = 1)]
        periods_per_year: u32,
    },

    /// XIRR of dated cash flows
    Xirr {
        /// Dated flow as DATE:AMOUNT (e.g. 2024-01-15:-10000); repeat per flow
        #[arg(long = "flow", value_parser = parse_dated_flow, allow_hyphen_values = true, required = true)]
        flows: Vec<DatedCashFlow>,
    },

    /// Return on investment
    Roi {
        #[arg(long)]
        investment: f64,
        #[arg(long)]
        revenue: f64,
        #[arg(long)]
        costs: f64,
    },

    /// Ownership after a priced equity round
    Dilution {
        #[arg(long)]
        pre_money: f64,
        /// Shares outstanding before the round
        #[arg(long)]
        shares: f64,
        #[arg(long)]
        investment: f64,
    },

    /// Company valuation from industry multiples
    Valuation {
        #[arg(long, value_parser = parse_industry)]
        industry: Industry,
        /// revenue, ebitda or net_income
        #[arg(long, default_value = "revenue", value_parser = parse_metric)]
        metric: ValuationMetric,
        /// Annual value of the chosen metric
        #[arg(long)]
        value: f64,
        /// CSV of industry,metric,multiple overriding the built-in table
        #[arg(long)]
        multiples: Option<PathBuf>,
    },

    /// Evaluate a JSON request (or array of requests) from a file
    Run {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        multiples: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Sip { monthly, rate, years, step_up, schedule_csv } => {
            let result = calculate_sip(&SipInput {
                monthly_investment: monthly,
                annual_return_percent: rate,
                years,
                step_up_percent: step_up,
            })?;
            if let Some(path) = schedule_csv {
                write_csv(&path, &result.schedule)?;
            }
            print_json(&result)
        }
        Command::Swp { corpus, withdrawal, rate, years, step_up, schedule_csv } => {
            let result = calculate_swp(&SwpInput {
                total_investment: corpus,
                monthly_withdrawal: withdrawal,
                annual_return_percent: rate,
                years,
                step_up_percent: step_up,
            })?;
            if let Some(path) = schedule_csv {
                write_csv(&path, &result.schedule)?;
            }
            print_json(&result)
        }
        Command::Emi { kind, principal, rate, months, fee, schedule_csv } => {
            let result = calculate_loan(&LoanInput {
                kind,
                principal,
                annual_rate_percent: rate,
                tenure_months: months,
                processing_fee_percent: fee,
            })?;
            if let Some(path) = schedule_csv {
                write_csv(&path, &result.schedule)?;
            }
            print_json(&result)
        }
        Command::Irr { flows, periods_per_year } => {
            let result = calculate_irr(&IrrInput {
                cash_flows: flows,
                periods_per_year,
                solver: SolverConfig::default(),
            })?;
            print_json(&result)
        }
        Command::Xirr { flows } => {
            let result = calculate_xirr(&XirrInput {
                cash_flows: flows,
                solver: SolverConfig::default(),
            })?;
            print_json(&result)
        }
        Command::Roi { investment, revenue, costs } => {
            let result = calculate_roi(&RoiInput {
                investment,
                total_revenue: revenue,
                total_costs: costs,
            })?;
            print_json(&result)
        }
        Command::Dilution { pre_money, shares, investment } => {
            let result = calculate_dilution(&DilutionInput {
                pre_money_valuation: pre_money,
                current_shares: shares,
                new_investment: investment,
            })?;
            print_json(&result)
        }
        Command::Valuation { industry, metric, value, multiples } => {
            let table = load_table(multiples.as_deref())?;
            let result = calculate_valuation(
                &ValuationInput { industry, metric, metric_value: value },
                &table,
            )?;
            print_json(&result)
        }
        Command::Run { input, multiples } => {
            let table = load_table(multiples.as_deref())?;
            run_requests(&input, table)
        }
    }
}

/// Evaluate one request or an array of them, printing response envelopes
fn run_requests(input: &Path, table: MultipleTable) -> Result<()> {
    let contents = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid JSON in {}", input.display()))?;

    let runner = SensitivityRunner::with_table(table);

    if value.is_array() {
        let requests: Vec<CalculationRequest> = serde_json::from_value(value)?;
        info!("Evaluating {} requests", requests.len());
        print_json(&runner.run_requests(&requests))
    } else {
        let request: CalculationRequest = serde_json::from_value(value)?;
        print_json(&request.respond_with(runner.table()))
    }
}

fn load_table(path: Option<&Path>) -> Result<MultipleTable> {
    match path {
        Some(path) => {
            let table = MultipleTable::from_csv_path(path)
                .with_context(|| format!("Failed to load multiples from {}", path.display()))?;
            info!("Loaded {} multiples from {}", table.len(), path.display());
            Ok(table)
        }
        None => Ok(MultipleTable::default()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn parse_loan_kind(s: &str) -> Result<LoanKind, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "home" => Ok(LoanKind::Home),
        "business" => Ok(LoanKind::Business),
        "personal" => Ok(LoanKind::Personal),
        "vehicle" | "car" => Ok(LoanKind::Vehicle),
        other => Err(format!("unknown loan kind '{}'", other)),
    }
}

fn parse_industry(s: &str) -> Result<Industry, String> {
    Industry::parse(s).ok_or_else(|| {
        let known: Vec<&str> = Industry::ALL.iter().map(|i| i.as_str()).collect();
        format!("unknown industry '{}' (expected one of: {})", s, known.join(", "))
    })
}

fn parse_metric(s: &str) -> Result<ValuationMetric, String> {
    ValuationMetric::parse(s).ok_or_else(|| format!("unknown metric '{}'", s))
}

fn parse_dated_flow(s: &str) -> Result<DatedCashFlow, String> {
    let Some((date, amount)) = s.split_once(':') else {
        return Err(format!("expected DATE:AMOUNT, got '{}'", s));
    };
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| format!("bad date '{}': {}", date, e))?;
    let amount: f64 = amount
        .trim()
        .parse()
        .map_err(|e| format!("bad amount '{}': {}", amount, e))?;
    Ok(DatedCashFlow::new(date, amount))
}

