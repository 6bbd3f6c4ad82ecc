//! CSV rendering for command output.

use std::fmt::Write;

use cs_controls::{BlockId, FrequencySample};
use cs_sim::SeriesStore;

/// Long-form table, one row per sample, blocks in the given order.
pub fn series_csv<'a>(store: &SeriesStore, order: impl IntoIterator<Item = &'a BlockId>) -> String {
    let mut csv = String::from("block,time_s,value\n");
    for id in order {
        let Some(series) = store.get(id) else {
            continue;
        };
        for sample in series.samples() {
            let _ = writeln!(csv, "{},{},{}", id, sample.time, sample.value);
        }
    }
    csv
}

pub fn step_csv(sample_time: f64, output: &[f64]) -> String {
    let mut csv = String::from("time_s,value\n");
    for (k, y) in output.iter().enumerate() {
        let _ = writeln!(csv, "{},{}", k as f64 * sample_time, y);
    }
    csv
}

/// Degenerate frequencies keep their row with empty magnitude and phase.
pub fn frequency_csv(samples: &[FrequencySample]) -> String {
    let mut csv = String::from("frequency_hz,magnitude_db,phase_deg\n");
    for sample in samples {
        match sample.point() {
            Some(p) => {
                let _ = writeln!(csv, "{},{},{}", p.frequency, p.magnitude_db, p.phase_deg);
            }
            None => {
                let _ = writeln!(csv, "{},,", sample.frequency());
            }
        }
    }
    csv
}
