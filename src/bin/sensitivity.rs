//! Sweep EMI or SIP outcomes over a grid of rates
//!
//! Grid points are evaluated in parallel and written to CSV for charting

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use wealth_engine::{rate_range, SensitivityRunner};

#[derive(Parser)]
#[command(name = "sensitivity")]
#[command(about = "Rate sensitivity sweeps for loan EMI and SIP maturity")]
struct Args {
    #[command(subcommand)]
    sweep: Sweep,

    /// Lowest annual rate, percent
    #[arg(long, global = true, default_value_t = 6.0)]
    rate_from: f64,

    /// Highest annual rate, percent
    #[arg(long, global = true, default_value_t = 14.0)]
    rate_to: f64,

    /// Rate increment, percent
    #[arg(long, global = true, default_value_t = 0.25)]
    rate_step: f64,

    /// Output CSV path
    #[arg(short, long, global = true, default_value = "sensitivity_output.csv")]
    output: PathBuf,
}

#[derive(Subcommand)]
enum Sweep {
    /// EMI across rates and tenures
    Emi {
        #[arg(long)]
        principal: f64,
        /// Comma-separated tenures in months
        #[arg(long, value_delimiter = ',', default_value = "120,180,240,300")]
        tenures: Vec<u32>,
    },

    /// SIP maturity across expected returns and horizons
    Sip {
        #[arg(long)]
        monthly: f64,
        /// Comma-separated horizons in years
        #[arg(long, value_delimiter = ',', default_value = "5,10,15,20")]
        years: Vec<u32>,
        #[arg(long, default_value_t = 0.0)]
        step_up: f64,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    let rates = rate_range(args.rate_from, args.rate_to, args.rate_step)?;
    let runner = SensitivityRunner::new();

    let rows = match &args.sweep {
        Sweep::Emi { principal, tenures } => {
            println!("Sweeping EMI over {} rates x {} tenures...", rates.len(), tenures.len());
            let points = runner.emi_grid(*principal, &rates, tenures)?;
            write_rows(&args.output, &points)?
        }
        Sweep::Sip { monthly, years, step_up } => {
            println!("Sweeping SIP over {} rates x {} horizons...", rates.len(), years.len());
            let points = runner.sip_grid(*monthly, &rates, years, *step_up)?;
            write_rows(&args.output, &points)?
        }
    };

    println!("Wrote {} rows to {}", rows, args.output.display());
    println!("Total time: {:?}", start.elapsed());
    Ok(())
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(rows.len())
}
