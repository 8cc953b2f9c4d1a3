//! Transient A-type K+ channel kinetics.
//!
//! Unlike the Hodgkin-Huxley channels these are closed-form empirical fits of
//! the steady states and time constants; there is no alpha/beta split.
//!
//! The `a_inf` fit is not a bounded sigmoid: it exceeds 1 between about
//! 40.4 and 96.5 mV, peaking near 1.0127 at 64.8 mV. It is used unclamped.
//!
//! Reference: Connor JA, Walter D, McKown R. Biophys J. 1977;18:81-102
//! Reference: Dayan P, Abbott LF. Theoretical Neuroscience, 2001, eq. 6.5

use super::MS_TO_SEC;

/// Upper bound of [`a_inf`] over all voltages (maximum 1.012684 at 64.83 mV)
pub const A_INF_PEAK: f64 = 1.012_684;

/// A-current activation steady state
pub fn a_inf(v_mV: f64) -> f64 {
    let base = 0.0761 * (0.0314 * (v_mV + 94.22)).exp() / (1.0 + (0.0346 * (v_mV + 1.17)).exp());
    base.cbrt()
}

/// A-current activation time constant (s)
pub fn tau_a(v_mV: f64) -> f64 {
    (0.3632 + 1.158 / (1.0 + (0.0497 * (v_mV + 55.96)).exp())) * MS_TO_SEC
}

/// A-current inactivation steady state
pub fn b_inf(v_mV: f64) -> f64 {
    (1.0 / (1.0 + (0.0688 * (v_mV + 53.3)).exp())).powi(4)
}

/// A-current inactivation time constant (s)
pub fn tau_b(v_mV: f64) -> f64 {
    (1.24 + 2.678 / (1.0 + (0.0624 * (v_mV + 50.0)).exp())) * MS_TO_SEC
}
