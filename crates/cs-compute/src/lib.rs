//! Computation boundary between the simulation driver and the calculators.
//!
//! Every calculation travels as a [`ComputeRequest`] and comes back as exactly
//! one [`ComputeResponse`] carrying the same correlation token. Failures are
//! reported in the response's `error` string, never by unwinding across the
//! boundary.
//!
//! Two backends implement [`ComputeBackend`]:
//! - [`InlineBackend`]: computes on `submit`, queues the response in-process
//! - [`ComputeWorker`]: dedicated thread reachable only through channels

pub mod backend;
pub mod dispatch;
pub mod error;
pub mod message;
pub mod worker;

pub use backend::{ComputeBackend, InlineBackend};
pub use dispatch::handle;
pub use error::{ComputeError, ComputeResult};
pub use message::{
    ComputeKind, ComputeOutput, ComputeParams, ComputeRequest, ComputeResponse, PidParams,
    RequestId,
};
pub use worker::ComputeWorker;
