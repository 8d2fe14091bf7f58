//! Run-state tracking and result pacing around [`run_analysis`].
//!
//! The orchestrator has exactly two states. A request moves it from `Idle`
//! to `Running`; it returns to `Idle` once every artifact is produced or the
//! run fails. A second request while `Running` is refused with
//! [`RunError::Busy`] rather than queued.
//!
//! The configured `delay_ms` is slept after computing and before returning,
//! to pace how quickly results reach the display. It is not part of the
//! computation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::AnalysisConfig;
use crate::runner::{run_analysis, AnalysisReport, AnalysisRequest, RunError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Idle,
    Running,
}

/// Owns a config and guarantees at most one analysis in flight.
#[derive(Debug)]
pub struct Orchestrator {
    config: AnalysisConfig,
    running: AtomicBool,
}

impl Orchestrator {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            running: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn state(&self) -> RunState {
        if self.running.load(Ordering::Acquire) {
            RunState::Running
        } else {
            RunState::Idle
        }
    }

    /// Run one analysis, holding the `Running` state for its whole duration.
    pub fn run(&self, request: &AnalysisRequest) -> Result<AnalysisReport, RunError> {
        let _guard = RunningGuard::acquire(&self.running).ok_or_else(|| {
            warn!(ticker = %request.ticker, "analysis refused: another run is in flight");
            RunError::Busy
        })?;

        let report = run_analysis(request, &self.config)?;

        if self.config.run.delay_ms > 0 {
            thread::sleep(Duration::from_millis(self.config.run.delay_ms));
        }
        Ok(report)
    }
}

/// Flips the flag to `Running` and back to `Idle` on drop, error paths included.
struct RunningGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RunningGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    fn config(seed: u64, delay_ms: u64) -> AnalysisConfig {
        let mut c = AnalysisConfig::default();
        c.run.seed = Some(seed);
        c.run.delay_ms = delay_ms;
        c
    }

    #[test]
    fn returns_to_idle_after_success() {
        let orch = Orchestrator::new(config(1, 0));
        assert_eq!(orch.state(), RunState::Idle);
        orch.run(&AnalysisRequest::new("SPY", 1_000.0)).unwrap();
        assert_eq!(orch.state(), RunState::Idle);
    }

    #[test]
    fn returns_to_idle_after_failure() {
        let orch = Orchestrator::new(config(1, 0));
        assert!(orch.run(&AnalysisRequest::new("SPY", f64::NAN)).is_err());
        assert_eq!(orch.state(), RunState::Idle);
    }

    #[test]
    fn delay_paces_results() {
        let orch = Orchestrator::new(config(1, 50));
        let started = Instant::now();
        orch.run(&AnalysisRequest::new("SPY", 1_000.0)).unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn concurrent_request_is_busy() {
        let orch = Arc::new(Orchestrator::new(config(1, 300)));

        let background = {
            let orch = Arc::clone(&orch);
            thread::spawn(move || orch.run(&AnalysisRequest::new("SPY", 1_000.0)))
        };

        // Wait until the background run has claimed the Running state.
        let deadline = Instant::now() + Duration::from_secs(5);
        while orch.state() != RunState::Running && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(orch.state(), RunState::Running);

        let err = orch.run(&AnalysisRequest::new("QQQ", 1_000.0)).unwrap_err();
        assert!(matches!(err, RunError::Busy));

        assert!(background.join().unwrap().is_ok());
        assert_eq!(orch.state(), RunState::Idle);
    }

    #[test]
    fn same_seed_same_report() {
        let orch = Orchestrator::new(config(5, 0));
        let a = orch.run(&AnalysisRequest::new("SPY", 10.0)).unwrap();
        let b = orch.run(&AnalysisRequest::new("SPY", 10.0)).unwrap();
        assert_eq!(a.ensemble, b.ensemble);
    }
}
