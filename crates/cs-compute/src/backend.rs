//! Backend seam used by the simulation driver.

use std::collections::VecDeque;
use std::time::Duration;

use crate::dispatch::handle;
use crate::error::{ComputeError, ComputeResult};
use crate::message::{ComputeRequest, ComputeResponse};

/// Something that accepts requests and hands back responses.
///
/// Responses may arrive in any order; callers match them by `id`.
pub trait ComputeBackend {
    /// Queue a request for computation.
    fn submit(&mut self, request: ComputeRequest) -> ComputeResult<()>;

    /// Wait up to `timeout` for the next available response.
    fn recv_timeout(&mut self, timeout: Duration) -> ComputeResult<ComputeResponse>;
}

/// Computes synchronously on `submit` and queues the response.
#[derive(Debug, Default)]
pub struct InlineBackend {
    ready: VecDeque<ComputeResponse>,
}

impl InlineBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ComputeBackend for InlineBackend {
    fn submit(&mut self, request: ComputeRequest) -> ComputeResult<()> {
        self.ready.push_back(handle(&request));
        Ok(())
    }

    fn recv_timeout(&mut self, _timeout: Duration) -> ComputeResult<ComputeResponse> {
        self.ready.pop_front().ok_or(ComputeError::NothingPending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{ComputeParams, RequestId};

    #[test]
    fn inline_answers_in_submission_order() {
        let mut backend = InlineBackend::new();
        for id in 0..3 {
            backend
                .submit(ComputeRequest::new(
                    RequestId::new(id),
                    0,
                    ComputeParams::TransferFunction {
                        numerator: vec![1.0],
                        denominator: vec![1.0],
                        input: vec![id as f64],
                    },
                ))
                .unwrap();
        }
        for id in 0..3 {
            let resp = backend.recv_timeout(Duration::ZERO).unwrap();
            assert_eq!(resp.id, RequestId::new(id));
        }
        assert_eq!(
            backend.recv_timeout(Duration::ZERO),
            Err(ComputeError::NothingPending)
        );
    }
}
