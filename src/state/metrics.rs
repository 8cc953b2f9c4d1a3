//! Observables derived from the voltage trace.
//!
//! Aggregates the driver's state into a single serializable snapshot for
//! display and JSON export, and detects action potentials as upward threshold
//! crossings.

use serde::{Deserialize, Serialize};

use super::NeuronState;

/// Counts upward crossings of a voltage threshold
#[derive(Debug, Clone)]
pub struct SpikeDetector {
    /// Crossing threshold (mV)
    pub threshold_mV: f64,
    above: bool,
    spike_times_sec: Vec<f64>,
}

impl SpikeDetector {
    /// Create a detector with the given threshold
    pub fn new(threshold_mV: f64) -> Self {
        Self {
            threshold_mV,
            above: false,
            spike_times_sec: Vec::new(),
        }
    }

    /// Feed one voltage sample; returns true when it starts a spike
    pub fn observe(&mut self, time_sec: f64, v_mV: f64) -> bool {
        if v_mV > self.threshold_mV {
            if !self.above {
                self.above = true;
                self.spike_times_sec.push(time_sec);
                return true;
            }
        } else {
            self.above = false;
        }
        false
    }

    /// Number of spikes seen
    pub fn spike_count(&self) -> usize {
        self.spike_times_sec.len()
    }

    /// Onset times of all spikes (s)
    pub fn spike_times_sec(&self) -> &[f64] {
        &self.spike_times_sec
    }

    /// Mean firing rate over `duration_sec` (Hz)
    pub fn mean_rate_hz(&self, duration_sec: f64) -> f64 {
        if duration_sec > 0.0 {
            self.spike_count() as f64 / duration_sec
        } else {
            0.0
        }
    }

    /// Mean inter-spike interval (s), if at least two spikes were seen
    pub fn mean_isi_sec(&self) -> Option<f64> {
        if self.spike_times_sec.len() < 2 {
            return None;
        }
        let first = self.spike_times_sec[0];
        let last = self.spike_times_sec[self.spike_times_sec.len() - 1];
        Some((last - first) / (self.spike_times_sec.len() - 1) as f64)
    }

    /// Forget all spikes
    pub fn reset(&mut self) {
        self.above = false;
        self.spike_times_sec.clear();
    }
}

impl Default for SpikeDetector {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Snapshot of the simulation for display and export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationMetrics {
    // === Timing ===
    /// Simulated time (s)
    pub simulation_time_sec: f64,
    /// Host ticks executed
    pub tick_count: u64,
    /// Integration sub-steps per tick
    pub steps_per_tick: u32,
    /// Sub-step size (s)
    pub sub_step_sec: f64,

    // === State ===
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

    // === Firing ===
    /// Spikes detected so far
    pub spike_count: usize,
    /// Mean firing rate (Hz)
    pub mean_rate_hz: f64,
    /// First spike onset (s)
    pub first_spike_sec: Option<f64>,
    /// Mean inter-spike interval (s)
    pub mean_isi_sec: Option<f64>,

    // === Health ===
    /// All state components finite and every gate within its steady-state range
    pub state_valid: bool,
}

impl SimulationMetrics {
    /// Assemble a snapshot
    pub fn new(
        state: &NeuronState,
        ika_A: f64,
        simulation_time_sec: f64,
        tick_count: u64,
        steps_per_tick: u32,
        sub_step_sec: f64,
        spikes: &SpikeDetector,
    ) -> Self {
        Self {
            simulation_time_sec,
            tick_count,
            steps_per_tick,
            sub_step_sec,
            v_mV: state.v_mV,
            m: state.m,
            h: state.h,
            n: state.n,
            a: state.a,
            b: state.b,
            ika_A,
            spike_count: spikes.spike_count(),
            mean_rate_hz: spikes.mean_rate_hz(simulation_time_sec),
            first_spike_sec: spikes.spike_times_sec().first().copied(),
            mean_isi_sec: spikes.mean_isi_sec(),
            state_valid: state.is_physical(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spike_detector_counts_crossings() {
        let mut detector = SpikeDetector::new(0.0);
        let trace = [-65.0, -10.0, 5.0, 30.0, 2.0, -40.0, -70.0, 10.0, -5.0];
        let mut onsets = 0;
        for (i, v) in trace.iter().enumerate() {
            if detector.observe(i as f64 * 0.1, *v) {
                onsets += 1;
            }
        }
        assert_eq!(onsets, 2);
        assert_eq!(detector.spike_count(), 2);
        assert!((detector.spike_times_sec()[1] - 0.7).abs() < 1e-12);
        assert!((detector.mean_isi_sec().unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_mean_rate() {
        let mut detector = SpikeDetector::default();
        detector.observe(0.1, 10.0);
        detector.observe(0.2, -10.0);
        detector.observe(0.3, 10.0);
        assert!((detector.mean_rate_hz(2.0) - 1.0).abs() < 1e-12);
        assert_eq!(detector.mean_rate_hz(0.0), 0.0);
        detector.reset();
        assert_eq!(detector.spike_count(), 0);
    }
}
