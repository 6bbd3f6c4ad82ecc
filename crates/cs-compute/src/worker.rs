//! Threaded compute worker.
//!
//! The worker thread owns nothing but its two channel ends. Requests go in on
//! one channel, responses come out on the other; the thread exits when the
//! request sender is dropped.

use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, error};

use crate::backend::ComputeBackend;
use crate::dispatch::handle;
use crate::error::{ComputeError, ComputeResult};
use crate::message::{ComputeRequest, ComputeResponse};

pub struct ComputeWorker {
    request_tx: Option<Sender<ComputeRequest>>,
    response_rx: Receiver<ComputeResponse>,
    handle: Option<JoinHandle<()>>,
}

impl ComputeWorker {
    /// Spawn the worker thread.
    pub fn start() -> Self {
        let (request_tx, request_rx) = channel::<ComputeRequest>();
        let (response_tx, response_rx) = channel();

        let handle = thread::Builder::new()
            .name("cs-compute".to_string())
            .spawn(move || Self::serve(request_rx, response_tx))
            .map_err(|e| error!(error = %e, "failed to spawn compute worker"))
            .ok();

        Self {
            request_tx: Some(request_tx),
            response_rx,
            handle,
        }
    }

    fn serve(requests: Receiver<ComputeRequest>, responses: Sender<ComputeResponse>) {
        for request in requests {
            if responses.send(handle(&request)).is_err() {
                debug!("response receiver dropped, worker exiting");
                return;
            }
        }
        debug!("request channel closed, worker exiting");
    }

    /// Stop accepting requests and wait for the thread to finish.
    pub fn shutdown(&mut self) {
        self.request_tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("compute worker thread panicked");
            }
        }
    }
}

impl ComputeBackend for ComputeWorker {
    fn submit(&mut self, request: ComputeRequest) -> ComputeResult<()> {
        let tx = self.request_tx.as_ref().ok_or(ComputeError::Disconnected)?;
        if self.handle.is_none() {
            return Err(ComputeError::Disconnected);
        }
        tx.send(request).map_err(|_| ComputeError::Disconnected)
    }

    fn recv_timeout(&mut self, timeout: Duration) -> ComputeResult<ComputeResponse> {
        self.response_rx
            .recv_timeout(timeout)
            .map_err(|e| match e {
                RecvTimeoutError::Timeout => ComputeError::Timeout {
                    waited_ms: timeout.as_millis(),
                },
                RecvTimeoutError::Disconnected => ComputeError::Disconnected,
            })
    }
}

impl Drop for ComputeWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
