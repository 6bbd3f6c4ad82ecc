//! Per-block output time series.

use std::collections::HashMap;

use cs_controls::BlockId;
use serde::{Deserialize, Serialize};

/// One recorded value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Simulation time (seconds).
    pub time: f64,
    pub value: f64,
}

/// Append-only sequence of samples for one block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    samples: Vec<Sample>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, time: f64, value: f64) {
        self.samples.push(Sample { time, value });
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.time).collect()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// All series of a run, keyed by block.
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    series: HashMap<BlockId, TimeSeries>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample to the block's series, creating it on first use.
    pub fn append(&mut self, block: &BlockId, time: f64, value: f64) {
        self.series
            .entry(block.clone())
            .or_default()
            .push(time, value);
    }

    pub fn get(&self, block: &BlockId) -> Option<&TimeSeries> {
        self.series.get(block)
    }

    /// Number of samples recorded for `block` (zero if none).
    pub fn len_of(&self, block: &BlockId) -> usize {
        self.series.get(block).map_or(0, TimeSeries::len)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BlockId, &TimeSeries)> {
        self.series.iter()
    }

    pub fn clear(&mut self) {
        self.series.clear();
    }
}
