//! Configuration of the neuron model.
//!
//! Parameters are held in internal units; display-unit conversion lives in
//! [`units`] and is applied only at the presentation boundary.

mod parameters;
mod units;

pub use parameters::ModelParameters;
pub use units::{ParameterKey, PER_MM2_TO_PER_CM2};
