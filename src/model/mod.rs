//! Connor-Stevens membrane equation.
//!
//! Single-compartment current balance with four conductances:
//!
//! ```text
//! c_m dV/dt = I_app - I_stim - g_Na m³h (V - E_Na) - g_K n⁴ (V - E_K)
//!                            - g_L (V - E_L) - g_A a³b (V - E_A)
//! dx/dt     = (x_inf(V) - x) / tau_x(V)      for x in {m, h, n, a, b}
//! ```
//!
//! Currents are densities in uA/mm², so `I / c_m` is in V/s and is scaled by
//! 1000 to give mV/s.
//!
//! Reference: Dayan P, Abbott LF. Theoretical Neuroscience, 2001, eq. 6.1-6.5

pub mod integrator;

pub use integrator::{IntegrationMethod, Integrator};

use serde::{Deserialize, Serialize};

use crate::config::ModelParameters;
use crate::kinetics::Gate;
use crate::state::{NeuronState, StateDerivatives};

/// (uA/mm²) / (uF/mm²) = V/s → mV/s
pub const CURRENT_BALANCE_TO_MV_PER_SEC: f64 = 1000.0;

/// Host stimulus (A) → model current density (uA, applied per mm²)
pub const STIMULUS_A_TO_UA: f64 = 1.0e6;

/// Model current density (uA/mm²) → reported current (A)
pub const UA_TO_A: f64 = 1.0e-6;

/// Instantaneous conductance densities (mS/mm²)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Conductances {
    /// g_Na_max · m³h
    pub na_mS_per_mm2: f64,
    /// g_K_max · n⁴
    pub k_mS_per_mm2: f64,
    /// g_A_max · a³b
    pub a_mS_per_mm2: f64,
    /// g_L
    pub leak_mS_per_mm2: f64,
}

impl Conductances {
    /// Open-channel conductances for `state`
    pub fn new(params: &ModelParameters, state: &NeuronState) -> Self {
        Self {
            na_mS_per_mm2: params.g_na_max_mS_per_mm2 * state.m.powi(3) * state.h,
            k_mS_per_mm2: params.g_k_max_mS_per_mm2 * state.n.powi(4),
            a_mS_per_mm2: params.g_a_max_mS_per_mm2 * state.a.powi(3) * state.b,
            leak_mS_per_mm2: params.g_l_mS_per_mm2,
        }
    }

    /// Sum of all conductances
    pub fn total(&self) -> f64 {
        self.na_mS_per_mm2 + self.k_mS_per_mm2 + self.a_mS_per_mm2 + self.leak_mS_per_mm2
    }
}

/// Current densities contributing to the balance (uA/mm², outward positive)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MembraneCurrents {
    /// Fast Na+ current
    pub na_uA_per_mm2: f64,
    /// Delayed-rectifier K+ current
    pub k_uA_per_mm2: f64,
    /// A-type K+ current
    pub a_uA_per_mm2: f64,
    /// Leak current
    pub leak_uA_per_mm2: f64,
    /// Applied bias current (inward positive)
    pub applied_uA_per_mm2: f64,
    /// Host stimulus after unit conversion (outward positive)
    pub stimulus_uA_per_mm2: f64,
}

impl MembraneCurrents {
    /// Net current charging the membrane (uA/mm²)
    pub fn net_uA_per_mm2(&self) -> f64 {
        self.applied_uA_per_mm2
            - self.stimulus_uA_per_mm2
            - self.na_uA_per_mm2
            - self.k_uA_per_mm2
            - self.leak_uA_per_mm2
            - self.a_uA_per_mm2
    }

    /// A-type K+ current in amperes
    pub fn ika_A(&self) -> f64 {
        self.a_uA_per_mm2 * UA_TO_A
    }
}

/// Result of one derivative evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Rate of change of every state variable
    pub derivatives: StateDerivatives,
    /// Currents at the evaluated state
    pub currents: MembraneCurrents,
}

/// Derivative evaluator for the Connor-Stevens equations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnorStevensModel {
    /// Parameter set in internal units
    pub params: ModelParameters,
}

impl ConnorStevensModel {
    /// Create a model for the given parameters
    pub fn new(params: ModelParameters) -> Self {
        Self { params }
    }

    /// Currents flowing at `state` with host stimulus `stimulus_A`
    pub fn currents(&self, state: &NeuronState, stimulus_A: f64) -> MembraneCurrents {
        let p = &self.params;
        let g = Conductances::new(p, state);
        let v = state.v_mV;

        MembraneCurrents {
            na_uA_per_mm2: g.na_mS_per_mm2 * (v - p.e_na_mV),
            k_uA_per_mm2: g.k_mS_per_mm2 * (v - p.e_k_mV),
            a_uA_per_mm2: g.a_mS_per_mm2 * (v - p.e_a_mV),
            leak_uA_per_mm2: g.leak_mS_per_mm2 * (v - p.e_l_mV),
            applied_uA_per_mm2: p.i_app_uA_per_mm2,
            stimulus_uA_per_mm2: stimulus_A * STIMULUS_A_TO_UA,
        }
    }

    /// Evaluate dy/dt at `state`; does not modify the state
    pub fn evaluate(&self, state: &NeuronState, stimulus_A: f64) -> Evaluation {
        let currents = self.currents(state, stimulus_A);
        let v = state.v_mV;

        let derivatives = StateDerivatives {
            dv_mV_per_sec: currents.net_uA_per_mm2() * CURRENT_BALANCE_TO_MV_PER_SEC
                / self.params.cm_uF_per_mm2,
            dm_per_sec: Gate::M.relaxation_rate(v, state.m),
            dh_per_sec: Gate::H.relaxation_rate(v, state.h),
            dn_per_sec: Gate::N.relaxation_rate(v, state.n),
            da_per_sec: Gate::A.relaxation_rate(v, state.a),
            db_per_sec: Gate::B.relaxation_rate(v, state.b),
        };

        Evaluation {
            derivatives,
            currents,
        }
    }

    /// Shorthand for `evaluate(..).derivatives`
    pub fn derivatives(&self, state: &NeuronState, stimulus_A: f64) -> StateDerivatives {
        self.evaluate(state, stimulus_A).derivatives
    }

    /// State at rest for the configured initial voltage
    pub fn resting_state(&self) -> NeuronState {
        NeuronState::at_rest(self.params.v0_mV)
    }
}
