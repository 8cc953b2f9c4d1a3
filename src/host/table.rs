//! Human-readable parameter and state table.
//!
//! This is the presentation boundary: every value in the table is in display
//! units (per cm² for densities), and edits made through it are converted
//! back to internal units before reaching the model.

use std::fmt;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::{ModelParameters, ParameterKey};
use crate::driver::{HostModel, TickDriver};
use crate::kinetics::Gate;
use crate::model::UA_TO_A;

/// Role of a table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    /// Signal read from the host each tick
    Input,
    /// Signal written to the host each tick
    Output,
    /// Editable parameter
    Parameter,
    /// Read-only model state
    State,
}

impl EntryKind {
    /// Whether the presentation layer may edit the entry
    pub fn is_editable(self) -> bool {
        matches!(self, EntryKind::Parameter)
    }
}

/// One row of the table
#[derive(Debug, Clone, Serialize)]
pub struct TableEntry {
    /// Name shown to the user
    pub name: String,
    /// Longer description
    pub description: String,
    /// Display unit (empty for dimensionless values)
    pub unit: String,
    /// Value in display units
    pub value: f64,
    /// Entry role
    pub kind: EntryKind,
}

impl TableEntry {
    fn new(name: &str, description: &str, unit: &str, value: f64, kind: EntryKind) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            unit: unit.to_string(),
            value,
            kind,
        }
    }
}

/// Snapshot of everything the host displays for the model
#[derive(Debug, Clone, Serialize)]
pub struct ParameterTable {
    entries: Vec<TableEntry>,
}

impl ParameterTable {
    /// Build the table from the driver's current parameters and state
    pub fn from_driver(driver: &TickDriver) -> Self {
        let params = driver.parameters();
        let state = driver.state();
        let mut entries = Vec::with_capacity(2 + ParameterKey::ALL.len() + Gate::ALL.len() + 2);

        entries.push(TableEntry::new(
            "Vm",
            "Membrane Potential",
            "V",
            state.membrane_potential_V(),
            EntryKind::Output,
        ));
        entries.push(TableEntry::new(
            "Istim",
            "Input current",
            "A",
            driver.currents().stimulus_uA_per_mm2 * UA_TO_A,
            EntryKind::Input,
        ));

        for key in ParameterKey::ALL {
            entries.push(TableEntry::new(
                key.name(),
                key.description(),
                key.display_unit(),
                params.get_display(key),
                EntryKind::Parameter,
            ));
        }

        for gate in Gate::ALL {
            entries.push(TableEntry::new(
                gate.symbol(),
                gate.description(),
                "",
                state.gate(gate),
                EntryKind::State,
            ));
        }

        entries.push(TableEntry::new(
            "IKA",
            "A-type Potassium Current",
            "A",
            driver.ika_A(),
            EntryKind::State,
        ));
        entries.push(TableEntry::new(
            "Time",
            "Time",
            "s",
            driver.elapsed_sec(),
            EntryKind::State,
        ));

        Self { entries }
    }

    /// All rows in display order
    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    /// Look up a row by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&TableEntry> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Rows the user may edit
    pub fn editable(&self) -> impl Iterator<Item = &TableEntry> {
        self.entries.iter().filter(|e| e.kind.is_editable())
    }
}

impl fmt::Display for ParameterTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<10} {:>14} {:<9} {:<10} {}", "NAME", "VALUE", "UNIT", "KIND", "DESCRIPTION")?;
        for e in &self.entries {
            let kind = match e.kind {
                EntryKind::Input => "input",
                EntryKind::Output => "output",
                EntryKind::Parameter => "parameter",
                EntryKind::State => "state",
            };
            writeln!(
                f,
                "{:<10} {:>14.6} {:<9} {:<10} {}",
                e.name, e.value, e.unit, kind, e.description
            )?;
        }
        Ok(())
    }
}

/// Apply one edit given in display units; returns the key that changed
pub fn apply_edit(params: &mut ModelParameters, name: &str, display_value: f64) -> Result<ParameterKey> {
    let key: ParameterKey = name.parse()?;
    params
        .set_display(key, display_value)
        .with_context(|| format!("editing {}", key.label()))?;
    Ok(key)
}

/// Apply a batch of display-unit edits to the driver as one configuration change
///
/// Either every edit is applied and the state is reset to rest, or nothing
/// changes.
pub fn apply_edits(driver: &mut TickDriver, edits: &[(&str, f64)]) -> Result<()> {
    let mut params = driver.parameters().clone();
    for (name, value) in edits {
        let key = apply_edit(&mut params, name, *value)?;
        log::debug!("{} set to {} {}", key.name(), value, key.display_unit());
    }
    driver.on_configure(params);
    Ok(())
}
