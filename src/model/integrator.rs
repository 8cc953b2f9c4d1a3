//! Fixed-step ODE integration of the neuron state.
//!
//! Forward Euler is the real-time integrator: one derivative evaluation per
//! sub-step, first-order accurate, no step control and no stability check.
//! Classical 4th-order Runge-Kutta is kept alongside it to measure Euler's
//! error at a given rate.
//!
//! Reference: Press et al., Numerical Recipes, 3rd ed., Cambridge University Press 2007

use serde::{Deserialize, Serialize};

use crate::state::{NeuronState, StateDerivatives};

/// Available fixed-step schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationMethod {
    /// y += dt · f(y)
    #[default]
    ForwardEuler,
    /// Classical RK4
    RungeKutta4,
}

impl IntegrationMethod {
    /// Derivative evaluations per step
    pub fn evaluations_per_step(self) -> usize {
        match self {
            IntegrationMethod::ForwardEuler => 1,
            IntegrationMethod::RungeKutta4 => 4,
        }
    }
}

/// Fixed-step integrator with a step counter
#[derive(Debug, Clone, Default)]
pub struct Integrator {
    /// Scheme used by [`Integrator::step`]
    pub method: IntegrationMethod,
    /// Number of steps taken
    pub step_count: u64,
}

impl Integrator {
    /// Create an integrator using `method`
    pub fn new(method: IntegrationMethod) -> Self {
        Self {
            method,
            step_count: 0,
        }
    }

    /// Advance `state` in place by `dt_sec`
    ///
    /// `derivatives` is called once (Euler) or four times (RK4).
    pub fn step<F>(&mut self, state: &mut NeuronState, dt_sec: f64, derivatives: F)
    where
        F: FnMut(&NeuronState) -> StateDerivatives,
    {
        match self.method {
            IntegrationMethod::ForwardEuler => euler_step(state, dt_sec, derivatives),
            IntegrationMethod::RungeKutta4 => rk4_step(state, dt_sec, derivatives),
        }
        self.step_count += 1;
    }

    /// Take `n_steps` steps of `dt_sec`
    pub fn run<F>(&mut self, state: &mut NeuronState, dt_sec: f64, n_steps: usize, mut derivatives: F)
    where
        F: FnMut(&NeuronState) -> StateDerivatives,
    {
        for _ in 0..n_steps {
            self.step(state, dt_sec, &mut derivatives);
        }
    }

    /// Reset the step counter
    pub fn reset(&mut self) {
        self.step_count = 0;
    }
}

/// One forward-Euler step: y += dt · f(y)
#[inline]
pub fn euler_step<F>(state: &mut NeuronState, dt_sec: f64, mut derivatives: F)
where
    F: FnMut(&NeuronState) -> StateDerivatives,
{
    let dydt = derivatives(state);
    *state = state.advanced(&dydt, dt_sec);
}

/// One classical RK4 step
///
/// k1 = f(y)
/// k2 = f(y + dt/2 · k1)
/// k3 = f(y + dt/2 · k2)
/// k4 = f(y + dt · k3)
/// y_new = y + dt/6 · (k1 + 2·k2 + 2·k3 + k4)
pub fn rk4_step<F>(state: &mut NeuronState, dt_sec: f64, mut derivatives: F)
where
    F: FnMut(&NeuronState) -> StateDerivatives,
{
    let half = 0.5 * dt_sec;

    let k1 = derivatives(state);
    let k2 = derivatives(&state.advanced(&k1, half));
    let k3 = derivatives(&state.advanced(&k2, half));
    let k4 = derivatives(&state.advanced(&k3, dt_sec));

    let slope = k1 + k2 * 2.0 + k3 * 2.0 + k4;
    *state = state.advanced(&slope, dt_sec / 6.0);
}
