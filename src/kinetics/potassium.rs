//! Delayed-rectifier K+ channel kinetics (Hodgkin-Huxley form).
//!
//! Reference: Dayan P, Abbott LF. Theoretical Neuroscience, 2001, eq. 6.4

use super::{linoid, steady_state, time_constant_sec};

/// K+ activation opening rate (1/ms)
///
/// Singular at V = -45.7 mV; see [`linoid`](super::linoid).
#[inline]
pub fn alpha_n(v_mV: f64) -> f64 {
    linoid(0.02, -(v_mV + 45.7), 10.0)
}

/// K+ activation closing rate (1/ms)
#[inline]
pub fn beta_n(v_mV: f64) -> f64 {
    0.25 * (-0.0125 * (v_mV + 55.7)).exp()
}

/// K+ activation steady state
pub fn n_inf(v_mV: f64) -> f64 {
    steady_state(alpha_n(v_mV), beta_n(v_mV))
}

/// K+ activation time constant (s)
pub fn tau_n(v_mV: f64) -> f64 {
    time_constant_sec(alpha_n(v_mV), beta_n(v_mV))
}
