//! Dynamical state of the single-compartment neuron.

use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

use crate::kinetics::Gate;

/// Conversion from the model's mV to the host's volts
pub const MV_TO_V: f64 = 1.0e-3;

/// The six integrated state variables
///
/// Gating variables are fractions that relax toward their steady states, so
/// they stay within `[0, Gate::upper_bound]` while the integration is stable.
/// Nothing clamps them, so an unstable step size can push them out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeuronState {
    /// Membrane potential (mV)
    pub v_mV: f64,
    /// Na+ activation
    pub m: f64,
    /// Na+ inactivation
    pub h: f64,
    /// Delayed-rectifier K+ activation
    pub n: f64,
    /// A-type K+ activation
    pub a: f64,
    /// A-type K+ inactivation
    pub b: f64,
}

impl NeuronState {
    /// Number of integrated variables
    pub const DIMENSION: usize = 6;

    /// State at rest: voltage `v_mV` with every gate at its steady state
    pub fn at_rest(v_mV: f64) -> Self {
        Self {
            v_mV,
            m: Gate::M.steady_state(v_mV),
            h: Gate::H.steady_state(v_mV),
            n: Gate::N.steady_state(v_mV),
            a: Gate::A.steady_state(v_mV),
            b: Gate::B.steady_state(v_mV),
        }
    }

    /// Value of a gating variable
    pub fn gate(&self, gate: Gate) -> f64 {
        match gate {
            Gate::M => self.m,
            Gate::H => self.h,
            Gate::N => self.n,
            Gate::A => self.a,
            Gate::B => self.b,
        }
    }

    /// Membrane potential in volts
    pub fn membrane_potential_V(&self) -> f64 {
        self.v_mV * MV_TO_V
    }

    /// `self + dt * rate`
    #[inline]
    pub fn advanced(&self, rate: &StateDerivatives, dt_sec: f64) -> Self {
        Self {
            v_mV: self.v_mV + dt_sec * rate.dv_mV_per_sec,
            m: self.m + dt_sec * rate.dm_per_sec,
            h: self.h + dt_sec * rate.dh_per_sec,
            n: self.n + dt_sec * rate.dn_per_sec,
            a: self.a + dt_sec * rate.da_per_sec,
            b: self.b + dt_sec * rate.db_per_sec,
        }
    }

    /// Every component is finite
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|x| x.is_finite())
    }

    /// Every gating variable lies between 0 and its steady-state ceiling
    pub fn gates_in_range(&self) -> bool {
        Gate::ALL
            .iter()
            .all(|&g| (0.0..=g.upper_bound()).contains(&self.gate(g)))
    }

    /// Finite with every gate in range; false once the integration has blown up
    pub fn is_physical(&self) -> bool {
        self.is_finite() && self.gates_in_range()
    }

    /// Components in the order V, m, h, n, a, b
    pub fn to_array(&self) -> [f64; Self::DIMENSION] {
        [self.v_mV, self.m, self.h, self.n, self.a, self.b]
    }
}

impl Default for NeuronState {
    fn default() -> Self {
        Self::at_rest(-65.0)
    }
}

/// Time derivative of [`NeuronState`] (per second)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StateDerivatives {
    /// dV/dt (mV/s)
    pub dv_mV_per_sec: f64,
    /// dm/dt (1/s)
    pub dm_per_sec: f64,
    /// dh/dt (1/s)
    pub dh_per_sec: f64,
    /// dn/dt (1/s)
    pub dn_per_sec: f64,
    /// da/dt (1/s)
    pub da_per_sec: f64,
    /// db/dt (1/s)
    pub db_per_sec: f64,
}

impl StateDerivatives {
    /// Rate of change of a gating variable
    pub fn gate(&self, gate: Gate) -> f64 {
        match gate {
            Gate::M => self.dm_per_sec,
            Gate::H => self.dh_per_sec,
            Gate::N => self.dn_per_sec,
            Gate::A => self.da_per_sec,
            Gate::B => self.db_per_sec,
        }
    }

    /// Largest absolute gating rate
    pub fn max_gate_rate(&self) -> f64 {
        Gate::ALL
            .iter()
            .map(|&g| self.gate(g).abs())
            .fold(0.0, f64::max)
    }
}

impl Add for StateDerivatives {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            dv_mV_per_sec: self.dv_mV_per_sec + rhs.dv_mV_per_sec,
            dm_per_sec: self.dm_per_sec + rhs.dm_per_sec,
            dh_per_sec: self.dh_per_sec + rhs.dh_per_sec,
            dn_per_sec: self.dn_per_sec + rhs.dn_per_sec,
            da_per_sec: self.da_per_sec + rhs.da_per_sec,
            db_per_sec: self.db_per_sec + rhs.db_per_sec,
        }
    }
}

impl Mul<f64> for StateDerivatives {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        Self {
            dv_mV_per_sec: self.dv_mV_per_sec * k,
            dm_per_sec: self.dm_per_sec * k,
            dh_per_sec: self.dh_per_sec * k,
            dn_per_sec: self.dn_per_sec * k,
            da_per_sec: self.da_per_sec * k,
            db_per_sec: self.db_per_sec * k,
        }
    }
}
