//! Background runner for analysis requests
//!
//! Each request runs on its own thread and reports back through a shared
//! channel. The UI thread drains the channel on every tick.

use crate::model::fetch::{AnalysisRequest, Completion};
use crate::model::{FetchController, FetchError, ProgressSnapshot};
use crate::services::analysis::AnalysisClient;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error};

/// Message sent by a worker thread when its request finishes
#[derive(Debug)]
pub struct AnalysisMessage {
    pub seq: u64,
    pub result: Result<ProgressSnapshot, FetchError>,
}

/// Runs analysis requests off the UI thread
pub struct AnalysisRunner {
    client: Arc<dyn AnalysisClient>,
    sender: Sender<AnalysisMessage>,
    receiver: Receiver<AnalysisMessage>,
    in_flight: usize,
}

impl AnalysisRunner {
    pub fn new(client: Arc<dyn AnalysisClient>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            client,
            sender,
            receiver,
            in_flight: 0,
        }
    }

    /// Number of spawned requests that have not reported back yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Spawn a worker for `request`
    pub fn spawn(&mut self, request: AnalysisRequest) {
        let client = Arc::clone(&self.client);
        let tx = self.sender.clone();
        let seq = request.seq;
        self.in_flight += 1;

        let spawned = thread::Builder::new()
            .name(format!("analysis-{}", seq))
            .spawn(move || {
                let result = client.analyze(&request.repo_url);
                let _ = tx.send(AnalysisMessage { seq, result });
            });

        if let Err(e) = spawned {
            error!(seq, error = %e, "failed to spawn analysis worker");
            let _ = self.sender.send(AnalysisMessage {
                seq,
                result: Err(FetchError::Transport(format!(
                    "failed to start request: {}",
                    e
                ))),
            });
        }
    }

    /// Feed finished requests into the controller.
    ///
    /// Returns true if any completion changed visible state.
    pub fn poll(&mut self, controller: &mut FetchController) -> bool {
        let mut applied = false;

        loop {
            match self.receiver.try_recv() {
                Ok(message) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    if controller.complete(message.seq, message.result) == Completion::Applied {
                        applied = true;
                    }
                }
                Err(TryRecvError::Empty) => break,
                // The runner holds a sender, so this only happens during teardown
                Err(TryRecvError::Disconnected) => {
                    debug!("analysis channel disconnected");
                    break;
                }
            }
        }

        applied
    }
}
