//! Voltage-dependent channel kinetics for the Connor-Stevens model.
//!
//! This module implements the rate functions that govern the five gating
//! variables of the model:
//! - Fast Na+ current: activation `m`, inactivation `h` (Hodgkin-Huxley form)
//! - Delayed-rectifier K+ current: activation `n` (Hodgkin-Huxley form)
//! - Transient A-type K+ current: activation `a`, inactivation `b` (empirical fits)
//!
//! All functions take the membrane potential in mV. Rate constants are in
//! 1/ms, steady states are dimensionless, and time constants are returned in
//! seconds so they share the integrator's time base.
//!
//! Steady states of the Hodgkin-Huxley gates and of `b` lie in [0, 1]. The
//! empirical `a_inf` fit overshoots slightly above +40 mV; see
//! [`Gate::upper_bound`].
//!
//! References:
//! - Connor JA, Stevens CF. J Physiol. 1971;213:31-53 (A-current kinetics)
//! - Connor JA, Walter D, McKown R. Biophys J. 1977;18:81-102 (rate fits)
//! - Dayan P, Abbott LF. Theoretical Neuroscience, MIT Press 2001, ch. 6

pub mod a_type;
pub mod potassium;
pub mod sodium;
pub mod stability;

pub use a_type::{a_inf, b_inf, tau_a, tau_b, A_INF_PEAK};
pub use potassium::{alpha_n, beta_n, n_inf, tau_n};
pub use sodium::{alpha_h, alpha_m, beta_h, beta_m, h_inf, m_inf, tau_h, tau_m};
pub use stability::{StabilityReport, VoltageWindow};

/// Conversion from the millisecond time base of the rate constants to seconds
pub const MS_TO_SEC: f64 = 1.0e-3;

/// Below this value of |x/y| the linear-exponential rate form is replaced by
/// its series expansion.
pub const SINGULARITY_TOLERANCE: f64 = 1.0e-6;

/// Evaluate `k * x / (exp(x / y) - 1)`.
///
/// The expression has a removable singularity at `x = 0` where it tends to
/// `k * y`. Close to that point the first-order expansion
/// `k * y * (1 - x / (2y))` is used instead of the quotient.
#[inline]
pub(crate) fn linoid(k: f64, x: f64, y: f64) -> f64 {
    let ratio = x / y;
    if ratio.abs() < SINGULARITY_TOLERANCE {
        k * y * (1.0 - ratio / 2.0)
    } else {
        k * x / ratio.exp_m1()
    }
}

/// Steady-state value `alpha / (alpha + beta)`
#[inline]
pub(crate) fn steady_state(alpha: f64, beta: f64) -> f64 {
    alpha / (alpha + beta)
}

/// Time constant `1 / (alpha + beta)`, converted from ms to seconds
#[inline]
pub(crate) fn time_constant_sec(alpha: f64, beta: f64) -> f64 {
    MS_TO_SEC / (alpha + beta)
}

/// The five gating variables of the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Na+ activation
    M,
    /// Na+ inactivation
    H,
    /// Delayed-rectifier K+ activation
    N,
    /// A-type K+ activation
    A,
    /// A-type K+ inactivation
    B,
}

impl Gate {
    /// All gates in state-vector order
    pub const ALL: [Gate; 5] = [Gate::M, Gate::H, Gate::N, Gate::A, Gate::B];

    /// Steady-state value at `v_mV`
    pub fn steady_state(self, v_mV: f64) -> f64 {
        match self {
            Gate::M => m_inf(v_mV),
            Gate::H => h_inf(v_mV),
            Gate::N => n_inf(v_mV),
            Gate::A => a_inf(v_mV),
            Gate::B => b_inf(v_mV),
        }
    }

    /// Relaxation time constant at `v_mV` (seconds)
    pub fn time_constant_sec(self, v_mV: f64) -> f64 {
        match self {
            Gate::M => tau_m(v_mV),
            Gate::H => tau_h(v_mV),
            Gate::N => tau_n(v_mV),
            Gate::A => tau_a(v_mV),
            Gate::B => tau_b(v_mV),
        }
    }

    /// Largest value the steady state reaches at any voltage
    ///
    /// 1 for every gate except `a`, whose fit peaks at [`A_INF_PEAK`].
    pub fn upper_bound(self) -> f64 {
        match self {
            Gate::A => A_INF_PEAK,
            _ => 1.0,
        }
    }

    /// Relaxation rate `(x_inf(V) - x) / tau_x(V)` (1/s)
    #[inline]
    pub fn relaxation_rate(self, v_mV: f64, value: f64) -> f64 {
        (self.steady_state(v_mV) - value) / self.time_constant_sec(v_mV)
    }

    /// Short symbol used in tables and exports
    pub fn symbol(self) -> &'static str {
        match self {
            Gate::M => "m",
            Gate::H => "h",
            Gate::N => "n",
            Gate::A => "a",
            Gate::B => "b",
        }
    }

    /// Human-readable description
    pub fn description(self) -> &'static str {
        match self {
            Gate::M => "Sodium Activation",
            Gate::H => "Sodium Inactivation",
            Gate::N => "Potassium Activation",
            Gate::A => "A-type Potassium Activation",
            Gate::B => "A-type Potassium Inactivation",
        }
    }
}
