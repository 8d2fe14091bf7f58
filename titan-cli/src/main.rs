//! Titan CLI — run one analysis and print it, or dump the default config.
//!
//! Commands:
//! - `run`: synthesize a series, score it, estimate VaR, simulate paths
//! - `config`: print the default `AnalysisConfig` as TOML
//!
//! Logs go to stderr (`RUST_LOG` overrides the `info` default) so `--json`
//! output on stdout stays machine-readable.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use titan_runner::{
    fmt_pct, fmt_usd, run_analysis, run_analysis_as_of, AnalysisConfig, AnalysisReport,
    AnalysisRequest,
};

#[derive(Parser)]
#[command(name = "titan", about = "Titan CLI — synthetic market analysis engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one analysis and print the summary (or the full report as JSON).
    Run {
        /// Ticker label carried into the report.
        #[arg(long, default_value = "BTC-USD")]
        ticker: String,

        /// Capital the VaR figure is scaled by.
        #[arg(long, default_value_t = 1_000_000.0)]
        capital: f64,

        /// Master seed. Omit for a fresh seed per run.
        #[arg(long)]
        seed: Option<u64>,

        /// Path to a TOML config file. Flags below override its values.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Length of the synthesized history.
        #[arg(long)]
        days: Option<usize>,

        /// Number of Monte Carlo paths.
        #[arg(long)]
        sims: Option<usize>,

        /// Horizon of each Monte Carlo path, in steps.
        #[arg(long)]
        horizon: Option<usize>,

        /// Date the series ends before (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        as_of: Option<String>,

        /// Print the whole report as JSON instead of the summary.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the default config as TOML.
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            ticker,
            capital,
            seed,
            config,
            days,
            sims,
            horizon,
            as_of,
            json,
        } => {
            let overrides = Overrides {
                seed,
                days,
                sims,
                horizon,
            };
            run_cmd(ticker, capital, config, overrides, as_of, json)
        }
        Commands::Config => {
            print!("{}", AnalysisConfig::default().to_toml()?);
            Ok(())
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
struct Overrides {
    seed: Option<u64>,
    days: Option<usize>,
    sims: Option<usize>,
    horizon: Option<usize>,
}

fn build_config(path: Option<PathBuf>, overrides: &Overrides) -> Result<AnalysisConfig> {
    let mut config = match path {
        Some(path) => AnalysisConfig::from_file(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    if let Some(seed) = overrides.seed {
        config.run.seed = Some(seed);
    }
    if let Some(days) = overrides.days {
        config.series.days = days;
    }
    if let Some(sims) = overrides.sims {
        config.paths.sims = sims;
    }
    if let Some(horizon) = overrides.horizon {
        config.paths.days = horizon;
    }

    config.validate()?;
    Ok(config)
}

fn run_cmd(
    ticker: String,
    capital: f64,
    config_path: Option<PathBuf>,
    overrides: Overrides,
    as_of: Option<String>,
    json: bool,
) -> Result<()> {
    let config = build_config(config_path, &overrides)?;
    let request = AnalysisRequest::new(ticker.to_uppercase(), capital);

    let report = match as_of.as_deref() {
        Some(s) => {
            let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("invalid --as-of date '{s}'"))?;
            run_analysis_as_of(&request, &config, date)?
        }
        None => run_analysis(&request, &config)?,
    };

    if json {
        println!("{}", report.to_json()?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &AnalysisReport) {
    let summary = &report.ensemble_summary;

    println!();
    println!("=== Titan Analysis ===");
    println!("Ticker:         {}", report.ticker);
    println!("Capital:        {}", fmt_usd(report.capital));
    println!("Seed:           {}", report.seed);
    if let (Some(first), Some(last)) = (report.series.first(), report.series.last()) {
        println!(
            "Series:         {} to {} ({} points)",
            first.date,
            last.date,
            report.series.len()
        );
        println!("Last Close:     {}", fmt_usd(last.close));
    }
    println!();
    println!("--- Signal ---");
    println!("Signal:         {}", report.signal.kind);
    println!("Momentum:       {}", fmt_pct(report.signal.momentum));
    println!();
    println!("--- Risk ---");
    println!(
        "VaR 95%:        {} ({})",
        fmt_usd(report.risk.var_cash),
        fmt_pct(report.risk.var_pct)
    );
    println!("Kelly:          {:.3}", report.risk.kelly);
    println!();
    println!("--- Monte Carlo ---");
    println!(
        "Paths:          {} x {} steps",
        summary.path_count, report.ensemble.days
    );
    println!("Mean Terminal:  {}", fmt_usd(summary.mean_terminal));
    println!(
        "P05 / P50 / P95: {} / {} / {}",
        fmt_usd(summary.p05_terminal),
        fmt_usd(summary.median_terminal),
        fmt_usd(summary.p95_terminal)
    );
    println!("Exp. Return:    {}", fmt_pct(summary.expected_return()));
    println!("P(below start): {}", fmt_pct(summary.prob_below_start));
    println!();
    println!("NOTE: all figures are derived from SYNTHETIC data");
}
