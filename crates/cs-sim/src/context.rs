//! Simulation state owned by the driver.
//!
//! The context holds everything that changes during a run: the clock, every
//! block's time series, every PID block's carried state and the run
//! generation. Calculators never see it; they receive values copied out of it.

use std::collections::HashMap;

use cs_controls::{BlockId, PidState};

use crate::clock::SimulationClock;
use crate::series::SeriesStore;

#[derive(Debug, Clone)]
pub struct SimulationContext {
    clock: SimulationClock,
    series: SeriesStore,
    pid_states: HashMap<BlockId, PidState>,
    generation: u64,
    running: bool,
}

impl SimulationContext {
    pub fn new(clock: SimulationClock) -> Self {
        Self {
            clock,
            series: SeriesStore::new(),
            pid_states: HashMap::new(),
            generation: 0,
            running: false,
        }
    }

    /// Begin a fresh run: new generation, clock at zero, series and PID
    /// state cleared.
    pub fn restart(&mut self) {
        self.generation += 1;
        self.clock.reset();
        self.series.clear();
        self.pid_states.clear();
        self.running = true;
    }

    /// End the current run. Results still in flight become stale.
    pub fn stop(&mut self) {
        if self.running {
            self.generation += 1;
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub(crate) fn clock_mut(&mut self) -> &mut SimulationClock {
        &mut self.clock
    }

    pub fn series(&self) -> &SeriesStore {
        &self.series
    }

    pub(crate) fn series_mut(&mut self) -> &mut SeriesStore {
        &mut self.series
    }

    /// Carried PID state for `block`, zero if it has not stepped yet.
    pub fn pid_state(&self, block: &BlockId) -> PidState {
        self.pid_states.get(block).copied().unwrap_or_default()
    }

    pub(crate) fn set_pid_state(&mut self, block: BlockId, state: PidState) {
        self.pid_states.insert(block, state);
    }
}
