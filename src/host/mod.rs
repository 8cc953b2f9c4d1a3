//! Host-side collaborators of the tick driver.
//!
//! - [`table`]: parameter/state table in display units, and edits through it
//! - [`runner`]: headless fixed-period host loop

pub mod runner;
pub mod table;

pub use runner::{RunConfig, SimulationRunner};
pub use table::{apply_edit, apply_edits, EntryKind, ParameterTable, TableEntry};
