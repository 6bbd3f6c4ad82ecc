//! Stepping driver.
//!
//! One call to [`Driver::step`] is one simulation tick:
//!
//! 1. advance the clock; stop without processing if the run is over
//! 2. evaluate source blocks inline and append their samples
//! 3. submit one request per delegated block, stamped with the run generation
//! 4. wait for responses, matching them by request id
//!
//! Responses from another generation, or for ids this step did not issue, are
//! dropped. A block whose calculation fails gets no sample this tick and is
//! listed in the [`StepReport`]; the other blocks are unaffected.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use cs_compute::{
    ComputeBackend, ComputeError, ComputeOutput, ComputeParams, ComputeRequest, ComputeResponse,
    PidParams, RequestId,
};
use cs_controls::{Block, BlockId, BlockKind};
use tracing::{debug, info, warn};

use crate::clock::SimulationClock;
use crate::context::SimulationContext;
use crate::error::{SimError, SimResult};
use crate::series::TimeSeries;

/// Stand-in signal values fed to blocks that would otherwise read upstream
/// connections. The driver does not propagate values along the diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceholderInputs {
    /// PID setpoint.
    pub setpoint: f64,
    /// PID process value.
    pub process_value: f64,
    /// Single-sample input fed to transfer-function blocks.
    pub transfer_input: f64,
    /// Input multiplied by gain blocks.
    pub gain_input: f64,
}

impl Default for PlaceholderInputs {
    fn default() -> Self {
        Self {
            setpoint: 1.0,
            process_value: 0.5,
            transfer_input: 1.0,
            gain_input: 1.0,
        }
    }
}

/// Driver options.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub placeholders: PlaceholderInputs,
    /// Longest a step waits for outstanding responses.
    pub response_timeout: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            placeholders: PlaceholderInputs::default(),
            response_timeout: Duration::from_secs(5),
        }
    }
}

/// A block that produced no sample this step.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockFailure {
    pub block_id: BlockId,
    pub message: String,
}

/// Outcome of one step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Simulation time after advancing.
    pub time: f64,
    /// Samples appended this step.
    pub appended: usize,
    pub failures: Vec<BlockFailure>,
    /// Responses dropped as stale or unknown.
    pub discarded: usize,
    /// True when this step ended the run.
    pub finished: bool,
}

/// Totals over a whole run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub samples: usize,
    pub failures: Vec<BlockFailure>,
    pub discarded: usize,
}

struct Pending {
    block_index: usize,
}

pub struct Driver<B: ComputeBackend> {
    blocks: Vec<Block>,
    backend: B,
    ctx: SimulationContext,
    config: DriverConfig,
    next_request: u64,
}

impl<B: ComputeBackend> Driver<B> {
    pub fn new(blocks: Vec<Block>, clock: SimulationClock, backend: B, config: DriverConfig) -> Self {
        Self {
            blocks,
            backend,
            ctx: SimulationContext::new(clock),
            config,
            next_request: 0,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn context(&self) -> &SimulationContext {
        &self.ctx
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn series(&self, block: &BlockId) -> Option<&TimeSeries> {
        self.ctx.series().get(block)
    }

    pub fn is_running(&self) -> bool {
        self.ctx.is_running()
    }

    /// Start (or restart) a run.
    pub fn start(&mut self) {
        self.ctx.restart();
        info!(
            generation = self.ctx.generation(),
            blocks = self.blocks.len(),
            sample_time = self.ctx.clock().sample_time(),
            duration = self.ctx.clock().duration(),
            "simulation started"
        );
    }

    /// Cancel the run. Outstanding responses will be discarded.
    pub fn stop(&mut self) {
        if self.ctx.is_running() {
            info!(
                time = self.ctx.clock().current_time(),
                "simulation stopped"
            );
        }
        self.ctx.stop();
    }

    fn next_id(&mut self) -> RequestId {
        let id = RequestId::new(self.next_request);
        self.next_request += 1;
        id
    }

    fn request_params(&self, block: &Block) -> Option<ComputeParams> {
        let inputs = self.config.placeholders;
        match &block.kind {
            BlockKind::Pid {
                kp,
                ki,
                kd,
                sample_time,
            } => {
                let state = self.ctx.pid_state(&block.id);
                Some(ComputeParams::Pid(PidParams {
                    gains: cs_controls::PidGains::new(*kp, *ki, *kd),
                    setpoint: inputs.setpoint,
                    process_value: inputs.process_value,
                    dt: *sample_time,
                    previous_error: state.previous_error,
                    integral: state.integral,
                }))
            }
            BlockKind::TransferFunction {
                numerator,
                denominator,
            } => Some(ComputeParams::TransferFunction {
                numerator: numerator.clone(),
                denominator: denominator.clone(),
                input: vec![inputs.transfer_input],
            }),
            _ => None,
        }
    }

    /// Advance one sample and evaluate every block.
    pub fn step(&mut self) -> SimResult<StepReport> {
        if !self.ctx.is_running() {
            return Err(SimError::NotRunning);
        }

        let t = self.ctx.clock_mut().advance();
        let mut report = StepReport {
            time: t,
            ..StepReport::default()
        };
        if self.ctx.clock().is_finished() {
            self.stop();
            report.finished = true;
            return Ok(report);
        }

        let generation = self.ctx.generation();
        let mut pending: HashMap<RequestId, Pending> = HashMap::new();

        for index in 0..self.blocks.len() {
            let block = &self.blocks[index];
            if let Err(e) = block.kind.validate() {
                report.failures.push(BlockFailure {
                    block_id: block.id.clone(),
                    message: e.to_string(),
                });
                continue;
            }

            if let Some(value) = block
                .kind
                .source_output(t, self.config.placeholders.gain_input)
            {
                let id = block.id.clone();
                self.ctx.series_mut().append(&id, t, value);
                report.appended += 1;
                continue;
            }

            let Some(params) = self.request_params(block) else {
                continue;
            };
            let block_id = block.id.clone();
            let request_id = self.next_id();
            match self
                .backend
                .submit(ComputeRequest::new(request_id, generation, params))
            {
                Ok(()) => {
                    pending.insert(request_id, Pending { block_index: index });
                }
                Err(e) => report.failures.push(BlockFailure {
                    block_id,
                    message: e.to_string(),
                }),
            }
        }

        self.collect(&mut pending, generation, t, &mut report);

        for failure in &report.failures {
            warn!(block = %failure.block_id, time = t, error = %failure.message, "block failed");
        }
        debug!(
            step = self.ctx.clock().steps(),
            time = t,
            appended = report.appended,
            failed = report.failures.len(),
            discarded = report.discarded,
            "step complete"
        );
        Ok(report)
    }

    fn collect(
        &mut self,
        pending: &mut HashMap<RequestId, Pending>,
        generation: u64,
        t: f64,
        report: &mut StepReport,
    ) {
        let deadline = Instant::now() + self.config.response_timeout;
        while !pending.is_empty() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.backend.recv_timeout(remaining) {
                Ok(response) => {
                    if response.generation != generation {
                        debug!(id = %response.id, generation = response.generation, "stale response dropped");
                        report.discarded += 1;
                        continue;
                    }
                    let Some(entry) = pending.remove(&response.id) else {
                        debug!(id = %response.id, "unexpected response dropped");
                        report.discarded += 1;
                        continue;
                    };
                    self.apply(entry.block_index, response, t, report);
                }
                Err(e) => {
                    let message = match e {
                        ComputeError::Timeout { .. } => "no response before step deadline".to_string(),
                        other => other.to_string(),
                    };
                    for (_, entry) in pending.drain() {
                        report.failures.push(BlockFailure {
                            block_id: self.blocks[entry.block_index].id.clone(),
                            message: message.clone(),
                        });
                    }
                }
            }
        }
    }

    fn apply(&mut self, block_index: usize, response: ComputeResponse, t: f64, report: &mut StepReport) {
        let block_id = self.blocks[block_index].id.clone();
        if response.degenerate_denominator {
            warn!(block = %block_id, time = t, "denominator leading coefficient is zero, using 1");
        }
        let value = match response.into_result() {
            Ok(ComputeOutput::Pid(out)) => {
                self.ctx.set_pid_state(block_id.clone(), out.next_state());
                out.output
            }
            Ok(ComputeOutput::Sequence(values)) => values.first().copied().unwrap_or(0.0),
            Ok(ComputeOutput::Frequency(_)) => {
                report.failures.push(BlockFailure {
                    block_id,
                    message: "frequency response is not a time-series result".to_string(),
                });
                return;
            }
            Err(message) => {
                report.failures.push(BlockFailure { block_id, message });
                return;
            }
        };
        self.ctx.series_mut().append(&block_id, t, value);
        report.appended += 1;
    }

    /// Start if needed, then step until the run finishes.
    pub fn run_to_completion(&mut self) -> SimResult<RunSummary> {
        if !self.ctx.is_running() {
            self.start();
        }
        let mut summary = RunSummary::default();
        loop {
            let report = self.step()?;
            summary.samples += report.appended;
            summary.discarded += report.discarded;
            summary.failures.extend(report.failures);
            if report.finished {
                break;
            }
            summary.steps += 1;
        }
        info!(
            steps = summary.steps,
            samples = summary.samples,
            failures = summary.failures.len(),
            "simulation finished"
        );
        Ok(summary)
    }
}
