//! Discrete-time simulation driver for control block diagrams.
//!
//! Provides:
//! - Simulation clock with fixed sample time and duration
//! - Append-only per-block time series
//! - Explicit simulation context (clock, series, PID state, run generation)
//! - Stepping driver that evaluates sources inline and delegates PID and
//!   transfer-function blocks to a compute backend

pub mod clock;
pub mod context;
pub mod driver;
pub mod error;
pub mod series;

pub use clock::SimulationClock;
pub use context::SimulationContext;
pub use driver::{BlockFailure, Driver, DriverConfig, PlaceholderInputs, RunSummary, StepReport};
pub use error::{SimError, SimResult};
pub use series::{Sample, SeriesStore, TimeSeries};
