//! Connor-Stevens neuron simulator
//!
//! Real-time simulation of a single-compartment neuron with Hodgkin-Huxley
//! Na+/K+ currents plus a transient A-type K+ current. A host scheduler ticks
//! the model once per period with a stimulus sample; each tick runs a fixed
//! number of forward-Euler sub-steps and returns the membrane potential.

// Allow non-snake-case for unit suffixes in field names (mV, uA_per_mm2, etc.)
// This follows the project convention of including units in names.
#![allow(non_snake_case)]

pub mod config;
pub mod driver;
pub mod export;
pub mod host;
pub mod kinetics;
pub mod model;
pub mod state;
pub mod stimulus;

pub use config::{ModelParameters, ParameterKey};
pub use driver::{drive, steps_per_tick, HostModel, TickDriver};
pub use export::{CsvExporter, TraceRecord};
pub use host::{ParameterTable, RunConfig, SimulationRunner};
pub use kinetics::{Gate, StabilityReport, VoltageWindow};
pub use model::{ConnorStevensModel, IntegrationMethod, Integrator, MembraneCurrents};
pub use state::{NeuronState, SimulationMetrics, SpikeDetector, StateDerivatives};
pub use stimulus::{Stimulus, StimulusSource};
