//! Export functionality for simulation data.
//!
//! Provides CSV time-series export of the voltage/gating trace and JSON
//! export of run summaries.

mod csv_export;
mod json_export;

pub use csv_export::{CsvExporter, TraceRecord};
pub use json_export::{export_metrics_json, export_metrics_json_to, RunExport, EXPORT_VERSION};
