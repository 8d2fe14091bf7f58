//! Analysis runner — wires the engine components into one report.
//!
//! Scheduling is a one-level DAG: the series is synthesized first, then
//! signal scoring, VaR, the Monte Carlo ensemble (anchored on the final
//! close), and the spectrum run concurrently. Each task draws from its own
//! sub-seeded source and every path gets a source keyed by its index, so a
//! fixed master seed yields the same report on any number of threads, or
//! with `parallel = false`.
//!
//! There is no partial success: the first component error fails the run.

use std::time::Instant;

use chrono::{NaiveDate, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use titan_core::{
    paths, risk, series, signal, spectrum, EngineError, Ensemble, PathParams, RiskEstimate,
    SeedHierarchy, Series, Signal, SpectrumPoint,
};

use crate::config::{AnalysisConfig, ConfigError};
use crate::summary::EnsembleSummary;

/// Sub-seed labels, one per independent task.
const SEED_SERIES: &str = "series";
const SEED_SIGNAL: &str = "signal";
const SEED_RISK: &str = "risk";
const SEED_PATHS: &str = "paths";
const SEED_SPECTRUM: &str = "spectrum";

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("an analysis is already running")]
    Busy,
}

/// What the display layer asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Cosmetic label. Never used in computation.
    pub ticker: String,
    pub capital: f64,
}

impl AnalysisRequest {
    pub fn new(ticker: impl Into<String>, capital: f64) -> Self {
        Self {
            ticker: ticker.into(),
            capital,
        }
    }
}

/// Everything one analysis run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub ticker: String,
    pub capital: f64,
    /// Master seed the run was derived from; replaying it reproduces the report.
    pub seed: u64,
    pub as_of: NaiveDate,
    pub series: Series,
    pub signal: Signal,
    pub risk: RiskEstimate,
    pub ensemble: Ensemble,
    pub ensemble_summary: EnsembleSummary,
    pub spectrum: Vec<SpectrumPoint>,
}

impl AnalysisReport {
    /// Pretty-printed JSON of the whole report.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Run a full analysis dated today (UTC).
pub fn run_analysis(request: &AnalysisRequest, config: &AnalysisConfig) -> Result<AnalysisReport, RunError> {
    run_analysis_as_of(request, config, Utc::now().date_naive())
}

/// Run a full analysis with the series ending the day before `as_of`.
pub fn run_analysis_as_of(
    request: &AnalysisRequest,
    config: &AnalysisConfig,
    as_of: NaiveDate,
) -> Result<AnalysisReport, RunError> {
    if !request.capital.is_finite() {
        return Err(EngineError::precondition(
            "analysis",
            format!("capital must be a finite number, got {}", request.capital),
        )
        .into());
    }
    config.validate()?;

    let seeds = config
        .run
        .seed
        .map(SeedHierarchy::new)
        .unwrap_or_else(SeedHierarchy::from_entropy);
    let parallel = config.run.parallel;

    info!(
        ticker = %request.ticker,
        capital = request.capital,
        seed = seeds.master_seed(),
        parallel,
        "analysis started"
    );
    let started = Instant::now();

    let series = timed("series", || {
        series::synthesize_until(&config.series, as_of, &mut seeds.source_for(SEED_SERIES, 0))
    })?;
    let start_price = series
        .last_close()
        .ok_or_else(|| EngineError::precondition("analysis", "series is empty"))?;

    let signal_task = || {
        timed("signal", || {
            signal::score(&series, &config.signal, &mut seeds.source_for(SEED_SIGNAL, 0))
        })
    };
    let risk_task = || {
        timed("risk", || {
            risk::estimate(
                &series,
                request.capital,
                &config.risk,
                &mut seeds.source_for(SEED_RISK, 0),
            )
        })
    };
    let ensemble_task =
        || timed("paths", || simulate_ensemble(start_price, &config.paths, &seeds, parallel));
    let spectrum_task = || {
        timed("spectrum", || {
            spectrum::synthesize(&config.spectrum, &mut seeds.source_for(SEED_SPECTRUM, 0))
        })
    };

    let ((signal, risk), (ensemble, spectrum)) = if parallel {
        rayon::join(
            || rayon::join(signal_task, risk_task),
            || rayon::join(ensemble_task, spectrum_task),
        )
    } else {
        ((signal_task(), risk_task()), (ensemble_task(), spectrum_task()))
    };
    let (signal, risk, ensemble, spectrum) = (signal?, risk?, ensemble?, spectrum?);

    let ensemble_summary = EnsembleSummary::from_ensemble(&ensemble)
        .ok_or_else(|| EngineError::precondition("analysis", "ensemble has no paths"))?;

    info!(
        ticker = %request.ticker,
        signal = %signal.kind,
        momentum = signal.momentum,
        var_pct = risk.var_pct,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "analysis finished"
    );

    Ok(AnalysisReport {
        ticker: request.ticker.clone(),
        capital: request.capital,
        seed: seeds.master_seed(),
        as_of,
        series,
        signal,
        risk,
        ensemble,
        ensemble_summary,
        spectrum,
    })
}

/// Simulate an ensemble with one sub-seeded source per path.
///
/// Paths share nothing, so with `parallel` they fan out over rayon; the
/// result is the same either way.
pub fn simulate_ensemble(
    start_price: f64,
    params: &PathParams,
    seeds: &SeedHierarchy,
    parallel: bool,
) -> Result<Ensemble, EngineError> {
    paths::check_start(start_price)?;
    params.validate()?;

    let one = |i: usize| paths::simulate_path(start_price, params, &mut seeds.source_for(SEED_PATHS, i as u64));

    let simulated = if parallel {
        (0..params.sims)
            .into_par_iter()
            .map(one)
            .collect::<Result<Vec<_>, _>>()?
    } else {
        (0..params.sims).map(one).collect::<Result<Vec<_>, _>>()?
    };

    Ok(Ensemble {
        start_price,
        days: params.days,
        paths: simulated,
    })
}

fn timed<T>(task: &'static str, f: impl FnOnce() -> Result<T, EngineError>) -> Result<T, EngineError> {
    let started = Instant::now();
    let result = f();
    debug!(
        task,
        ok = result.is_ok(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "component finished"
    );
    result
}
