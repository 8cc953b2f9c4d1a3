//! State of the simulated neuron.
//!
//! Contains the integrated state vector and its derivative, plus observables
//! derived from them for display and export.

mod metrics;
mod neuron;

pub use metrics::{SimulationMetrics, SpikeDetector};
pub use neuron::{NeuronState, StateDerivatives, MV_TO_V};
