//! Background dispatch of pairing requests.
//!
//! Each request runs on its own worker thread and reports back over an mpsc
//! channel that the event loop drains with [`PairingDispatcher::try_recv`].
//! Results carry the ticket they were issued under; whether a result still
//! matters is the wizard's decision, not the dispatcher's.

use super::{Outfit, PairingRequest, PairingService};
use crate::error::PairingError;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;
use tracing::{error, info, warn};

/// Messages sent from pairing worker threads to the main UI thread
#[derive(Debug)]
pub struct PairingMessage {
    pub ticket: u64,
    pub result: Result<Outfit, PairingError>,
}

pub struct PairingDispatcher {
    service: Arc<dyn PairingService>,
    tx: Sender<PairingMessage>,
    rx: Receiver<PairingMessage>,
}

impl PairingDispatcher {
    pub fn new(service: Arc<dyn PairingService>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { service, tx, rx }
    }

    /// Fire a request on a worker thread. Never blocks.
    pub fn dispatch(&self, ticket: u64, request: PairingRequest) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        info!(ticket, "Dispatching pairing request");

        let spawned = thread::Builder::new()
            .name(format!("pairing-{}", ticket))
            .spawn(move || {
                let result = service.submit_answers(&request);
                if let Err(ref e) = result {
                    warn!(ticket, "Pairing request failed: {}", e);
                }
                // Receiver gone means the app is shutting down
                let _ = tx.send(PairingMessage { ticket, result });
            });

        if let Err(e) = spawned {
            error!(ticket, "Failed to spawn pairing worker: {}", e);
            let _ = self.tx.send(PairingMessage {
                ticket,
                result: Err(PairingError::Network(format!(
                    "could not start request: {}",
                    e
                ))),
            });
        }
    }

    /// Next finished request, if any.
    pub fn try_recv(&self) -> Option<PairingMessage> {
        self.rx.try_recv().ok()
    }

    /// Block up to `timeout` for the next finished request.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<PairingMessage> {
        match self.rx.recv_timeout(timeout) {
            Ok(msg) => Some(msg),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
