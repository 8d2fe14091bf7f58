//! Titan Runner — analysis orchestration, configuration, and summaries.
//!
//! This crate builds on `titan-core` to provide:
//! - TOML configuration with one section per engine component
//! - `run_analysis`: series first, then signal / VaR / ensemble / spectrum in parallel
//! - Per-path sub-seeding so results do not depend on thread count
//! - An Idle/Running orchestrator with optional result pacing
//! - Terminal-price statistics over the Monte Carlo ensemble
//! - Currency / percentage formatting for the front ends

pub mod config;
pub mod format;
pub mod orchestrator;
pub mod runner;
pub mod summary;

pub use config::{AnalysisConfig, ConfigError, RunSettings};
pub use format::{fmt_pct, fmt_usd};
pub use orchestrator::{Orchestrator, RunState};
pub use runner::{
    run_analysis, run_analysis_as_of, simulate_ensemble, AnalysisReport, AnalysisRequest,
    RunError,
};
pub use summary::EnsembleSummary;
