//! Real-time tick driver.
//!
//! The host scheduler owns the clock. It reports the tick period, applies
//! parameter edits, and calls [`HostModel::on_tick`] once per period with one
//! stimulus sample. Each tick runs a fixed number of Euler sub-steps and
//! returns the membrane potential in volts; the work per tick is bounded and
//! deterministic.
//!
//! Configuration changes and ticks are assumed to be serialized by the host,
//! so the driver holds its state without any locking.

mod schedule;

pub use schedule::{steps_per_tick, sub_step_sec};

use std::time::Duration;

use crate::config::ModelParameters;
use crate::kinetics::StabilityReport;
use crate::model::{ConnorStevensModel, IntegrationMethod, Integrator, MembraneCurrents};
use crate::state::{NeuronState, SimulationMetrics, SpikeDetector};

/// Contract between a real-time host and a model it drives
pub trait HostModel {
    /// Host reports a new tick period
    fn on_period_change(&mut self, period: Duration);

    /// Host applies an edited parameter set
    fn on_configure(&mut self, params: ModelParameters);

    /// One tick: consume an input sample, produce an output sample
    fn on_tick(&mut self, input: f64) -> f64;
}

/// Feed `inputs` to `model` one tick at a time and collect the outputs
pub fn drive<M, I>(model: &mut M, inputs: I) -> Vec<f64>
where
    M: HostModel + ?Sized,
    I: IntoIterator<Item = f64>,
{
    inputs.into_iter().map(|x| model.on_tick(x)).collect()
}

/// Connor-Stevens neuron driven by host ticks
#[derive(Debug, Clone)]
pub struct TickDriver {
    model: ConnorStevensModel,
    state: NeuronState,
    integrator: Integrator,
    stability: StabilityReport,
    period: Duration,
    steps: u32,
    currents: MembraneCurrents,
    elapsed_sec: f64,
    tick_count: u64,
}

impl TickDriver {
    /// Create a driver at rest for `params`, ticking every `period`
    pub fn new(params: ModelParameters, period: Duration) -> Self {
        let model = ConnorStevensModel::new(params);
        let state = model.resting_state();
        let currents = model.currents(&state, 0.0);
        let steps = steps_per_tick(period, model.params.rate_hz);

        let driver = Self {
            model,
            state,
            integrator: Integrator::default(),
            stability: StabilityReport::default(),
            period,
            steps,
            currents,
            elapsed_sec: 0.0,
            tick_count: 0,
        };
        log::debug!(
            "Tick driver created: period {:?}, {} sub-steps of {:.3e} s",
            period,
            driver.steps,
            driver.sub_step_sec()
        );
        driver.check_stability();
        driver
    }

    /// Use a different integration scheme
    pub fn with_method(mut self, method: IntegrationMethod) -> Self {
        self.set_integration_method(method);
        self
    }

    /// Switch integration scheme
    pub fn set_integration_method(&mut self, method: IntegrationMethod) {
        self.integrator.method = method;
        log::info!("Integration method: {:?}", method);
    }

    /// Return to rest at the configured initial voltage and zero the clock
    pub fn reset(&mut self) {
        self.reinitialize_state();
        self.elapsed_sec = 0.0;
        self.tick_count = 0;
        self.integrator.reset();
    }

    fn reinitialize_state(&mut self) {
        self.state = self.model.resting_state();
        self.currents = self.model.currents(&self.state, 0.0);
    }

    fn check_stability(&self) {
        let dt = self.sub_step_sec();
        if !self.stability.is_step_stable(dt) {
            log::warn!(
                "Sub-step {:.3e} s exceeds the forward-Euler bound {:.3e} s set by tau_{} ({:.1} mV); \
                 raise the integration rate above {:.0} Hz",
                dt,
                self.stability.max_stable_step_sec,
                self.stability.fastest_gate.symbol(),
                self.stability.at_v_mV,
                self.stability.recommended_min_rate_hz
            );
        }
    }

    /// Parameter set in internal units
    pub fn parameters(&self) -> &ModelParameters {
        &self.model.params
    }

    /// Current state vector
    pub fn state(&self) -> &NeuronState {
        &self.state
    }

    /// Currents at the last derivative evaluation
    pub fn currents(&self) -> &MembraneCurrents {
        &self.currents
    }

    /// A-type K+ current at the last derivative evaluation (A)
    pub fn ika_A(&self) -> f64 {
        self.currents.ika_A()
    }

    /// Host tick period
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Integration sub-steps per tick
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Sub-step size (s)
    pub fn sub_step_sec(&self) -> f64 {
        sub_step_sec(self.period, self.steps)
    }

    /// Simulated time (s)
    pub fn elapsed_sec(&self) -> f64 {
        self.elapsed_sec
    }

    /// Ticks executed
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Integration scheme in use
    pub fn integration_method(&self) -> IntegrationMethod {
        self.integrator.method
    }

    /// Total integration steps taken
    pub fn integration_steps(&self) -> u64 {
        self.integrator.step_count
    }

    /// Step-size guidance for this model
    pub fn stability(&self) -> &StabilityReport {
        &self.stability
    }

    /// Snapshot for display and export
    pub fn metrics(&self, spikes: &SpikeDetector) -> SimulationMetrics {
        SimulationMetrics::new(
            &self.state,
            self.ika_A(),
            self.elapsed_sec,
            self.tick_count,
            self.steps,
            self.sub_step_sec(),
            spikes,
        )
    }
}

impl Default for TickDriver {
    fn default() -> Self {
        Self::new(ModelParameters::default(), Duration::from_micros(100))
    }
}

impl HostModel for TickDriver {
    fn on_period_change(&mut self, period: Duration) {
        self.period = period;
        self.steps = steps_per_tick(period, self.model.params.rate_hz);
        log::info!("Period changed to {:?}: {} sub-steps per tick", period, self.steps);
        self.check_stability();
    }

    fn on_configure(&mut self, params: ModelParameters) {
        self.model.params = params;
        self.steps = steps_per_tick(self.period, self.model.params.rate_hz);
        self.reinitialize_state();
        log::info!(
            "Parameters applied: V0 = {} mV, rate = {} Hz, {} sub-steps per tick",
            self.model.params.v0_mV,
            self.model.params.rate_hz,
            self.steps
        );
        self.check_stability();
    }

    /// `input` is the stimulus current (A); the return value is V (volts)
    fn on_tick(&mut self, input: f64) -> f64 {
        let dt = self.sub_step_sec();
        let model = &self.model;
        let mut currents = self.currents;

        for _ in 0..self.steps {
            self.integrator.step(&mut self.state, dt, |s| {
                let eval = model.evaluate(s, input);
                currents = eval.currents;
                eval.derivatives
            });
        }

        self.currents = currents;
        self.elapsed_sec += self.period.as_secs_f64();
        self.tick_count += 1;

        self.state.membrane_potential_V()
    }
}
