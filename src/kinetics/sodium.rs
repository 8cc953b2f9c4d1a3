//! Fast Na+ channel kinetics (Hodgkin-Huxley form).
//!
//! Rate constants are shifted and scaled relative to the squid axon values as
//! in the Connor-Stevens fit to crustacean walking-leg axons.
//!
//! Reference: Dayan P, Abbott LF. Theoretical Neuroscience, 2001, eq. 6.3

use super::{linoid, steady_state, time_constant_sec};

/// Na+ activation opening rate (1/ms)
///
/// Singular at V = -29.7 mV; see [`linoid`](super::linoid).
#[inline]
pub fn alpha_m(v_mV: f64) -> f64 {
    linoid(0.38, -(v_mV + 29.7), 10.0)
}

/// Na+ activation closing rate (1/ms)
#[inline]
pub fn beta_m(v_mV: f64) -> f64 {
    15.2 * (-0.0556 * (v_mV + 54.7)).exp()
}

/// Na+ activation steady state
pub fn m_inf(v_mV: f64) -> f64 {
    steady_state(alpha_m(v_mV), beta_m(v_mV))
}

/// Na+ activation time constant (s)
pub fn tau_m(v_mV: f64) -> f64 {
    time_constant_sec(alpha_m(v_mV), beta_m(v_mV))
}

/// Na+ inactivation recovery rate (1/ms)
#[inline]
pub fn alpha_h(v_mV: f64) -> f64 {
    0.26 * (-0.04 * (v_mV + 48.0)).exp()
}

/// Na+ inactivation rate (1/ms)
#[inline]
pub fn beta_h(v_mV: f64) -> f64 {
    3.8 / (1.0 + (-0.1 * (v_mV + 18.0)).exp())
}

/// Na+ inactivation steady state
pub fn h_inf(v_mV: f64) -> f64 {
    steady_state(alpha_h(v_mV), beta_h(v_mV))
}

/// Na+ inactivation time constant (s)
pub fn tau_h(v_mV: f64) -> f64 {
    time_constant_sec(alpha_h(v_mV), beta_h(v_mV))
}
