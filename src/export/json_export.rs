//! JSON export of run summaries.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::config::ModelParameters;
use crate::state::SimulationMetrics;

/// Export format version
pub const EXPORT_VERSION: &str = "1.0.0";

/// Full summary export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunExport {
    /// Export timestamp (RFC 3339)
    pub exported_at: String,
    /// Export version for compatibility
    pub version: String,
    /// Parameters the run used (internal units)
    pub parameters: ModelParameters,
    /// Metrics at the end of the run
    pub metrics: SimulationMetrics,
}

impl RunExport {
    /// Stamp a summary with the current local time
    pub fn new(parameters: &ModelParameters, metrics: &SimulationMetrics) -> Self {
        Self {
            exported_at: Local::now().to_rfc3339(),
            version: EXPORT_VERSION.to_string(),
            parameters: parameters.clone(),
            metrics: metrics.clone(),
        }
    }
}

/// Export a run summary into `dir`
///
/// Filename is auto-generated with timestamp: `summary_YYYYMMDD_HHMMSS.json`
pub fn export_metrics_json<P: AsRef<Path>>(
    parameters: &ModelParameters,
    metrics: &SimulationMetrics,
    dir: P,
) -> Result<PathBuf> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let filename = format!("summary_{}.json", Local::now().format("%Y%m%d_%H%M%S"));
    let path = dir.join(filename);
    export_metrics_json_to(parameters, metrics, &path)?;
    Ok(path)
}

/// Export a run summary to a specific file
pub fn export_metrics_json_to(
    parameters: &ModelParameters,
    metrics: &SimulationMetrics,
    path: &Path,
) -> Result<()> {
    let export = RunExport::new(parameters, metrics);

    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, &export)?;

    log::info!("JSON summary exported: {}", path.display());
    Ok(())
}
