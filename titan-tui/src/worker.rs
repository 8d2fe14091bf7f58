//! Background worker thread — every analysis runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Requests
//! queued while an analysis is computing are coalesced: only the newest one
//! runs, the rest are superseded without ever reaching the engine.

use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use titan_runner::{AnalysisReport, AnalysisRequest, Orchestrator};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    Analyze {
        generation: u64,
        request: AnalysisRequest,
    },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    AnalysisComplete {
        generation: u64,
        report: Box<AnalysisReport>,
    },
    AnalysisFailed {
        generation: u64,
        error: String,
    },
}

impl WorkerResponse {
    pub fn generation(&self) -> u64 {
        match self {
            WorkerResponse::AnalysisComplete { generation, .. }
            | WorkerResponse::AnalysisFailed { generation, .. } => *generation,
        }
    }
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    orchestrator: Orchestrator,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("titan-worker".into())
        .spawn(move || worker_loop(&orchestrator, rx, tx))
}

fn worker_loop(orchestrator: &Orchestrator, rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    loop {
        let cmd = match rx.recv() {
            Ok(cmd) => latest_command(cmd, &rx),
            Err(_) => break,
        };
        match cmd {
            WorkerCommand::Shutdown => break,
            WorkerCommand::Analyze { generation, request } => {
                let resp = match orchestrator.run(&request) {
                    Ok(report) => WorkerResponse::AnalysisComplete {
                        generation,
                        report: Box::new(report),
                    },
                    Err(e) => WorkerResponse::AnalysisFailed {
                        generation,
                        error: e.to_string(),
                    },
                };
                if tx.send(resp).is_err() {
                    break;
                }
            }
        }
    }
}

/// Drain whatever is already queued behind `first` and keep the newest
/// command. A queued `Shutdown` always wins.
fn latest_command(first: WorkerCommand, rx: &Receiver<WorkerCommand>) -> WorkerCommand {
    let mut latest = first;
    while let Ok(next) = rx.try_recv() {
        if matches!(latest, WorkerCommand::Shutdown) {
            continue;
        }
        latest = next;
    }
    latest
}
