//! Step-size guidance for fixed-step integration.
//!
//! Forward Euler applied to a relaxation `dx/dt = (x_inf - x) / tau` is stable
//! only while `dt < 2 tau`. The fastest gate (Na+ activation) sets the bound;
//! its time constant shrinks at hyperpolarized potentials, so the bound
//! depends on the voltage window the trajectory actually visits.
//!
//! This module only reports. The integrator never clamps gating variables or
//! adapts its step.

use super::Gate;

/// Voltage range scanned for the fastest time constant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltageWindow {
    /// Lower bound (mV)
    pub min_mV: f64,
    /// Upper bound (mV)
    pub max_mV: f64,
    /// Scan resolution (mV)
    pub resolution_mV: f64,
}

impl Default for VoltageWindow {
    fn default() -> Self {
        Self {
            // Covers the afterhyperpolarization and spike peak at default parameters
            min_mV: -80.0,
            max_mV: 60.0,
            resolution_mV: 0.1,
        }
    }
}

/// Result of a time-constant scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityReport {
    /// Gate with the smallest time constant in the window
    pub fastest_gate: Gate,
    /// Smallest time constant found (s)
    pub fastest_tau_sec: f64,
    /// Voltage where it occurs (mV)
    pub at_v_mV: f64,
    /// Largest forward-Euler step that keeps every gate relaxation stable (s)
    pub max_stable_step_sec: f64,
    /// Integration rate corresponding to `max_stable_step_sec` (Hz)
    pub recommended_min_rate_hz: f64,
}

impl StabilityReport {
    /// Scan every gate across `window`
    pub fn scan(window: &VoltageWindow) -> Self {
        let resolution = window.resolution_mV.abs().max(f64::EPSILON);
        let n_points = ((window.max_mV - window.min_mV) / resolution).floor().max(0.0) as usize;

        let mut fastest_gate = Gate::M;
        let mut fastest_tau_sec = f64::INFINITY;
        let mut at_v_mV = window.min_mV;

        for i in 0..=n_points {
            let v = window.min_mV + i as f64 * resolution;
            for gate in Gate::ALL {
                let tau = gate.time_constant_sec(v);
                if tau < fastest_tau_sec {
                    fastest_tau_sec = tau;
                    fastest_gate = gate;
                    at_v_mV = v;
                }
            }
        }

        let max_stable_step_sec = 2.0 * fastest_tau_sec;

        Self {
            fastest_gate,
            fastest_tau_sec,
            at_v_mV,
            max_stable_step_sec,
            recommended_min_rate_hz: 1.0 / max_stable_step_sec,
        }
    }

    /// Whether a sub-step of `dt_sec` stays inside the stability bound
    pub fn is_step_stable(&self, dt_sec: f64) -> bool {
        dt_sec < self.max_stable_step_sec
    }

    /// Whether integrating at `rate_hz` stays inside the stability bound
    pub fn is_rate_stable(&self, rate_hz: u32) -> bool {
        rate_hz > 0 && self.is_step_stable(1.0 / rate_hz as f64)
    }
}

impl Default for StabilityReport {
    fn default() -> Self {
        Self::scan(&VoltageWindow::default())
    }
}
