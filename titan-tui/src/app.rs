//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. Analyses run on the worker thread; every request
//! carries a generation number and only the response for the newest one is
//! applied.

use std::sync::mpsc::{Receiver, Sender};

use titan_runner::{AnalysisReport, AnalysisRequest};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Which chart fills the main area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Market,
    MonteCarlo,
    Spectrum,
}

impl View {
    pub const ALL: [View; 3] = [View::Market, View::MonteCarlo, View::Spectrum];

    pub fn index(self) -> usize {
        match self {
            View::Market => 0,
            View::MonteCarlo => 1,
            View::Spectrum => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Market => "MARKET",
            View::MonteCarlo => "MONTE",
            View::Spectrum => "FFT",
        }
    }

    pub fn next(self) -> View {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> View {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Which input field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Ticker,
    Capital,
}

impl Focus {
    pub fn toggle(self) -> Focus {
        match self {
            Focus::Ticker => Focus::Capital,
            Focus::Capital => Focus::Ticker,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub view: View,
    pub focus: Focus,

    pub ticker_input: String,
    pub capital_input: String,

    /// An analysis is in flight.
    pub loading: bool,
    /// Generation of the most recent request.
    pub generation: u64,
    pub report: Option<AnalysisReport>,

    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    pub status_message: Option<(String, StatusLevel)>,
}

impl AppState {
    pub fn new(worker_tx: Sender<WorkerCommand>, worker_rx: Receiver<WorkerResponse>) -> Self {
        Self {
            running: true,
            view: View::Market,
            focus: Focus::Ticker,
            ticker_input: "BTC-USD".into(),
            capital_input: "1000000".into(),
            loading: false,
            generation: 0,
            report: None,
            worker_tx,
            worker_rx,
            status_message: None,
        }
    }

    /// Append a typed character to the focused field. Tickers are upper-cased.
    pub fn push_char(&mut self, c: char) {
        match self.focus {
            Focus::Ticker => self.ticker_input.extend(c.to_uppercase()),
            Focus::Capital => self.capital_input.push(c),
        }
    }

    pub fn pop_char(&mut self) {
        match self.focus {
            Focus::Ticker => self.ticker_input.pop(),
            Focus::Capital => self.capital_input.pop(),
        };
    }

    /// Validate the inputs and hand a new request to the worker.
    ///
    /// Bad capital input never reaches the engine; it is reported in the
    /// status bar and the previous results stay on screen.
    pub fn request_analysis(&mut self) -> bool {
        let capital = match parse_capital(&self.capital_input) {
            Ok(c) => c,
            Err(msg) => {
                self.set_error(msg);
                return false;
            }
        };
        let ticker = self.ticker_input.trim().to_string();

        self.generation += 1;
        let cmd = WorkerCommand::Analyze {
            generation: self.generation,
            request: AnalysisRequest::new(ticker, capital),
        };
        if self.worker_tx.send(cmd).is_err() {
            self.set_error("analysis worker is not running");
            return false;
        }
        self.loading = true;
        if capital <= 0.0 {
            self.set_warning("PROCESSING... (capital is not positive, VaR cash will be too)");
        } else {
            self.set_status("PROCESSING...");
        }
        true
    }

    /// Apply a worker response. Returns false when it belongs to a
    /// superseded request and was dropped.
    pub fn apply_response(&mut self, resp: WorkerResponse) -> bool {
        if resp.generation() != self.generation {
            return false;
        }
        self.loading = false;
        match resp {
            WorkerResponse::AnalysisComplete { report, .. } => {
                self.set_status(format!(
                    "{}: {} (momentum {:+.4})",
                    report.ticker, report.signal.kind, report.signal.momentum
                ));
                self.report = Some(*report);
            }
            WorkerResponse::AnalysisFailed { error, .. } => self.set_error(error),
        }
        true
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}

/// Parse the capital field. Thousands separators (`,` `_`) are ignored.
pub fn parse_capital(input: &str) -> Result<f64, String> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | '$'))
        .collect();
    if cleaned.is_empty() {
        return Err("capital is empty".into());
    }
    let value: f64 = cleaned
        .parse()
        .map_err(|_| format!("capital '{input}' is not a number"))?;
    if !value.is_finite() {
        return Err(format!("capital '{input}' is not a finite number"));
    }
    Ok(value)
}
