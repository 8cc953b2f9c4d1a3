//! CSV time-series export of the simulated trace.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::state::NeuronState;

/// One row of the exported trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Ticks completed, counting this one
    pub tick: u64,
    /// Simulated time at the end of the tick (s)
    pub time_sec: f64,
    /// Membrane potential (mV)
    pub v_mV: f64,
    /// Na+ activation
    pub m: f64,
    /// Na+ inactivation
    pub h: f64,
    /// K+ activation
    pub n: f64,
    /// A-type K+ activation
    pub a: f64,
    /// A-type K+ inactivation
    pub b: f64,
    /// A-type K+ current (A)
    pub ika_A: f64,
    /// Stimulus sample fed to the tick (A)
    pub stimulus_A: f64,
    /// Output sample returned to the host (V)
    pub output_V: f64,
}

impl TraceRecord {
    /// Build a record from the state after a tick
    pub fn new(
        tick: u64,
        time_sec: f64,
        state: &NeuronState,
        ika_A: f64,
        stimulus_A: f64,
        output_V: f64,
    ) -> Self {
        Self {
            tick,
            time_sec,
            v_mV: state.v_mV,
            m: state.m,
            h: state.h,
            n: state.n,
            a: state.a,
            b: state.b,
            ika_A,
            stimulus_A,
            output_V,
        }
    }
}

/// CSV exporter for trace records
pub struct CsvExporter {
    writer: csv::Writer<File>,
    /// Record every n-th tick (0 and 1 record every tick)
    sample_every: u64,
    /// Tick of the last recorded row
    last_sample_tick: Option<u64>,
    /// Rows written
    rows: usize,
    /// Path to output file
    path: PathBuf,
}

impl CsvExporter {
    /// Create an exporter in `dir` with a timestamped filename
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new<P: AsRef<Path>>(dir: P, sample_every: u64) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("trace_{}.csv", timestamp));
        Self::create(path, sample_every)
    }

    /// Create an exporter writing to `path`
    pub fn create<P: Into<PathBuf>>(path: P, sample_every: u64) -> Result<Self> {
        let path = path.into();
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        let writer = csv::Writer::from_writer(file);

        log::info!("CSV export started: {}", path.display());

        Ok(Self {
            writer,
            sample_every,
            last_sample_tick: None, // first sample is always recorded
            rows: 0,
            path,
        })
    }

    /// Record a sample if enough ticks have passed since the last one
    pub fn maybe_record(&mut self, record: &TraceRecord) -> Result<bool> {
        let due = match self.last_sample_tick {
            Some(last) => record.tick.saturating_sub(last) >= self.sample_every,
            None => true,
        };
        if due {
            self.record(record)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Record a sample regardless of interval
    pub fn record(&mut self, record: &TraceRecord) -> Result<()> {
        self.writer.serialize(record)?;
        self.last_sample_tick = Some(record.tick);
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Finish writing and return the output path
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush()?;
        log::info!("CSV export completed: {} ({} rows)", self.path.display(), self.rows);
        Ok(self.path)
    }

    /// Get the output path
    pub fn path(&self) -> &Path {
        &self.path
    }
}
