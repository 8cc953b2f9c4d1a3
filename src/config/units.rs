//! Unit mapping at the presentation boundary.
//!
//! Parameters are stored per mm² (the model's internal units) but shown and
//! edited per cm². Conversion happens only here; model code never sees display
//! units.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error};

/// mm² → cm² scaling for area-normalized quantities (1 cm² = 100 mm²)
pub const PER_MM2_TO_PER_CM2: f64 = 100.0;

/// Every configurable entry of the parameter set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKey {
    /// Initial membrane potential
    V0,
    /// Specific membrane capacitance
    Cm,
    /// Maximal Na+ conductance density
    GNaMax,
    /// Na+ reversal potential
    ENa,
    /// Maximal delayed-rectifier K+ conductance density
    GKMax,
    /// K+ reversal potential
    EK,
    /// Maximal A-type K+ conductance density
    GAMax,
    /// A-type K+ reversal potential
    EA,
    /// Leak conductance density
    GL,
    /// Leak reversal potential
    EL,
    /// Applied bias current density
    Iapp,
    /// Internal integration rate
    Rate,
}

impl ParameterKey {
    /// All keys in table order
    pub const ALL: [ParameterKey; 12] = [
        ParameterKey::Iapp,
        ParameterKey::V0,
        ParameterKey::Cm,
        ParameterKey::GNaMax,
        ParameterKey::ENa,
        ParameterKey::GKMax,
        ParameterKey::EK,
        ParameterKey::GAMax,
        ParameterKey::EA,
        ParameterKey::GL,
        ParameterKey::EL,
        ParameterKey::Rate,
    ];

    /// Short name
    pub fn name(self) -> &'static str {
        match self {
            ParameterKey::V0 => "V0",
            ParameterKey::Cm => "Cm",
            ParameterKey::GNaMax => "G_Na_max",
            ParameterKey::ENa => "E_Na",
            ParameterKey::GKMax => "G_K_max",
            ParameterKey::EK => "E_K",
            ParameterKey::GAMax => "G_A_max",
            ParameterKey::EA => "E_A",
            ParameterKey::GL => "G_L",
            ParameterKey::EL => "E_L",
            ParameterKey::Iapp => "Iapp",
            ParameterKey::Rate => "Rate",
        }
    }

    /// Unit shown to the user
    pub fn display_unit(self) -> &'static str {
        match self {
            ParameterKey::V0
            | ParameterKey::ENa
            | ParameterKey::EK
            | ParameterKey::EA
            | ParameterKey::EL => "mV",
            ParameterKey::Cm => "uF/cm^2",
            ParameterKey::GNaMax | ParameterKey::GKMax | ParameterKey::GAMax | ParameterKey::GL => {
                "mS/cm^2"
            }
            ParameterKey::Iapp => "uA/cm^2",
            ParameterKey::Rate => "Hz",
        }
    }

    /// Unit the model computes in
    pub fn internal_unit(self) -> &'static str {
        match self {
            ParameterKey::Cm => "uF/mm^2",
            ParameterKey::GNaMax | ParameterKey::GKMax | ParameterKey::GAMax | ParameterKey::GL => {
                "mS/mm^2"
            }
            ParameterKey::Iapp => "uA/mm^2",
            other => other.display_unit(),
        }
    }

    /// Label combining name and display unit, e.g. `Cm (uF/cm^2)`
    pub fn label(self) -> String {
        format!("{} ({})", self.name(), self.display_unit())
    }

    /// Human-readable description
    pub fn description(self) -> &'static str {
        match self {
            ParameterKey::V0 => "Initial membrane potential",
            ParameterKey::Cm => "Specific membrane capacitance",
            ParameterKey::GNaMax => "Maximum Na+ conductance density",
            ParameterKey::ENa => "Sodium reversal potential",
            ParameterKey::GKMax => "Maximum delayed rectifier conductance density",
            ParameterKey::EK => "K+ reversal potential",
            ParameterKey::GAMax => "Maximum transient A-type K+ conductance density",
            ParameterKey::EA => "A-type K+ reversal potential",
            ParameterKey::GL => "Maximum leak conductance density",
            ParameterKey::EL => "Leak reversal potential",
            ParameterKey::Iapp => "Applied current",
            ParameterKey::Rate => "Rate of integration",
        }
    }

    /// Internal → display multiplier
    pub fn display_factor(self) -> f64 {
        match self {
            ParameterKey::Cm
            | ParameterKey::GNaMax
            | ParameterKey::GKMax
            | ParameterKey::GAMax
            | ParameterKey::GL
            | ParameterKey::Iapp => PER_MM2_TO_PER_CM2,
            _ => 1.0,
        }
    }

    /// Convert an internal value to display units
    pub fn to_display(self, internal: f64) -> f64 {
        internal * self.display_factor()
    }

    /// Convert a display value to internal units
    pub fn from_display(self, display: f64) -> f64 {
        display / self.display_factor()
    }

    /// Whether the value is an unsigned integer
    pub fn is_integer(self) -> bool {
        matches!(self, ParameterKey::Rate)
    }
}

impl fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParameterKey {
    type Err = Error;

    /// Accepts the short name (`G_Na_max`) or the full label (`G_Na_max (mS/cm^2)`),
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ParameterKey::ALL
            .into_iter()
            .find(|key| {
                key.name().eq_ignore_ascii_case(trimmed) || key.label().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| anyhow!("unknown parameter: {:?}", s))
    }
}
