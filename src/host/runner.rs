//! Headless host that plays the role of the real-time scheduler.
//!
//! Ticks the driver at a fixed period for a fixed duration, sampling the
//! stimulus protocol once per tick, and watches the output for spikes.

use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::ModelParameters;
use crate::driver::{HostModel, TickDriver};
use crate::export::{CsvExporter, TraceRecord};
use crate::model::IntegrationMethod;
use crate::state::{SimulationMetrics, SpikeDetector};
use crate::stimulus::{Stimulus, StimulusSource};

/// Settings of a headless run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Host tick period (µs)
    pub period_us: u64,
    /// Simulated duration (s)
    pub duration_sec: f64,
    /// Stimulus protocol
    pub stimulus: Stimulus,
    /// Integration scheme
    pub method: IntegrationMethod,
    /// Spike detection threshold (mV)
    pub spike_threshold_mV: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            // 10 kHz host loop
            period_us: 100,
            duration_sec: 1.0,
            stimulus: Stimulus::None,
            method: IntegrationMethod::ForwardEuler,
            spike_threshold_mV: 0.0,
        }
    }
}

impl RunConfig {
    /// Host tick period
    pub fn period(&self) -> Duration {
        Duration::from_micros(self.period_us)
    }

    /// Ticks needed to cover `duration_sec`
    pub fn n_ticks(&self) -> u64 {
        let period_ns = self.period().as_nanos();
        if period_ns == 0 || self.duration_sec <= 0.0 {
            return 0;
        }
        let duration_ns = (self.duration_sec * 1e9).round() as u128;
        u64::try_from(duration_ns.div_ceil(period_ns)).unwrap_or(u64::MAX)
    }

    /// Whole ticks in `interval_sec`, rounded to the nearest tick and at least one
    pub fn ticks_in(&self, interval_sec: f64) -> u64 {
        let period_ns = self.period().as_nanos().max(1);
        let interval_ns = (interval_sec.max(0.0) * 1e9).round() as u128;
        let ticks = interval_ns.saturating_add(period_ns / 2) / period_ns;
        u64::try_from(ticks).unwrap_or(u64::MAX).max(1)
    }

    /// Load from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading run configuration from {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("parsing run configuration from {}", path.display()))?;
        log::info!("Loaded run configuration from {:?}", path);
        Ok(config)
    }
}

/// Fixed-period host loop around a [`TickDriver`]
#[derive(Debug)]
pub struct SimulationRunner {
    driver: TickDriver,
    stimulus: StimulusSource,
    spikes: SpikeDetector,
    config: RunConfig,
}

impl SimulationRunner {
    /// Create a runner at rest
    pub fn new(params: ModelParameters, config: RunConfig) -> Result<Self> {
        ensure!(config.period_us > 0, "host period must be positive");
        ensure!(
            config.duration_sec.is_finite() && config.duration_sec >= 0.0,
            "duration must be finite and non-negative, got {}",
            config.duration_sec
        );
        let driver = TickDriver::new(params, config.period()).with_method(config.method);
        let stimulus = StimulusSource::new(config.stimulus.clone())?;
        log::info!(
            "Runner: {} ticks of {:?}, stimulus {:?}",
            config.n_ticks(),
            config.period(),
            stimulus.stimulus()
        );
        let spikes = SpikeDetector::new(config.spike_threshold_mV);

        Ok(Self {
            driver,
            stimulus,
            spikes,
            config,
        })
    }

    /// Driver being ticked
    pub fn driver(&self) -> &TickDriver {
        &self.driver
    }

    /// Mutable access for configuration changes between ticks
    pub fn driver_mut(&mut self) -> &mut TickDriver {
        &mut self.driver
    }

    /// Spikes detected so far
    pub fn spikes(&self) -> &SpikeDetector {
        &self.spikes
    }

    /// Run settings
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Execute one tick and return its trace record
    pub fn tick(&mut self) -> TraceRecord {
        let stimulus_A = self.stimulus.sample(self.driver.elapsed_sec());
        let output_V = self.driver.on_tick(stimulus_A);
        let time_sec = self.driver.elapsed_sec();

        if self.spikes.observe(time_sec, self.driver.state().v_mV) {
            log::debug!("Spike {} at {:.4} s", self.spikes.spike_count(), time_sec);
        }

        TraceRecord::new(
            self.driver.tick_count(),
            time_sec,
            self.driver.state(),
            self.driver.ika_A(),
            stimulus_A,
            output_V,
        )
    }

    /// Run for the configured duration
    pub fn run(&mut self) -> SimulationMetrics {
        for _ in 0..self.config.n_ticks() {
            self.tick();
        }
        self.metrics()
    }

    /// Run for the configured duration, streaming records to `exporter`
    pub fn run_with_sink(&mut self, exporter: &mut CsvExporter) -> Result<SimulationMetrics> {
        for _ in 0..self.config.n_ticks() {
            let record = self.tick();
            exporter.maybe_record(&record)?;
        }
        Ok(self.metrics())
    }

    /// Output samples (V) for the configured duration
    pub fn output_trace(&mut self) -> Vec<f64> {
        (0..self.config.n_ticks()).map(|_| self.tick().output_V).collect()
    }

    /// Current snapshot
    pub fn metrics(&self) -> SimulationMetrics {
        self.driver.metrics(&self.spikes)
    }
}
