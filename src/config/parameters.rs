//! Model parameter set.
//!
//! Values are stored in the model's internal units (per mm² for densities).
//! Defaults reproduce the Connor-Stevens parameterization, with the applied
//! current tuned for ~1 Hz tonic firing.
//!
//! Reference: Dayan P, Abbott LF. Theoretical Neuroscience, 2001, ch. 6

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::ParameterKey;

/// Physical constants and run settings of the neuron model
///
/// Capacitance and conductances must be strictly positive for the model to
/// be physically meaningful. They are not validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParameters {
    /// Initial (resting) membrane potential (mV)
    pub v0_mV: f64,
    /// Specific membrane capacitance (uF/mm²)
    /// Source: Dayan & Abbott 2001, c_m = 10 nF/mm²
    pub cm_uF_per_mm2: f64,
    /// Maximal Na+ conductance density (mS/mm²)
    pub g_na_max_mS_per_mm2: f64,
    /// Na+ reversal potential (mV)
    pub e_na_mV: f64,
    /// Maximal delayed-rectifier K+ conductance density (mS/mm²)
    pub g_k_max_mS_per_mm2: f64,
    /// K+ reversal potential (mV)
    pub e_k_mV: f64,
    /// Maximal A-type K+ conductance density (mS/mm²)
    pub g_a_max_mS_per_mm2: f64,
    /// A-type K+ reversal potential (mV)
    pub e_a_mV: f64,
    /// Leak conductance density (mS/mm²)
    pub g_l_mS_per_mm2: f64,
    /// Leak reversal potential (mV)
    pub e_l_mV: f64,
    /// Applied bias current density (uA/mm²)
    pub i_app_uA_per_mm2: f64,
    /// Internal integration rate (Hz)
    pub rate_hz: u32,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            v0_mV: -65.0,
            cm_uF_per_mm2: 1.0e-2,

            // Dayan & Abbott 2001, section 6.2
            g_na_max_mS_per_mm2: 1.2,
            e_na_mV: 55.0,
            g_k_max_mS_per_mm2: 0.2,
            e_k_mV: -72.0,
            g_a_max_mS_per_mm2: 0.477,
            e_a_mV: -75.0,
            g_l_mS_per_mm2: 0.003,
            e_l_mV: -70.0,

            // ~1 Hz spiking
            i_app_uA_per_mm2: 0.2404,

            rate_hz: 40_000,
        }
    }
}

impl ModelParameters {
    /// Read a value in internal units
    pub fn get(&self, key: ParameterKey) -> f64 {
        match key {
            ParameterKey::V0 => self.v0_mV,
            ParameterKey::Cm => self.cm_uF_per_mm2,
            ParameterKey::GNaMax => self.g_na_max_mS_per_mm2,
            ParameterKey::ENa => self.e_na_mV,
            ParameterKey::GKMax => self.g_k_max_mS_per_mm2,
            ParameterKey::EK => self.e_k_mV,
            ParameterKey::GAMax => self.g_a_max_mS_per_mm2,
            ParameterKey::EA => self.e_a_mV,
            ParameterKey::GL => self.g_l_mS_per_mm2,
            ParameterKey::EL => self.e_l_mV,
            ParameterKey::Iapp => self.i_app_uA_per_mm2,
            ParameterKey::Rate => self.rate_hz as f64,
        }
    }

    /// Write a value in internal units
    ///
    /// Rejects non-finite values, and for the integration rate anything that
    /// is not representable as an unsigned integer.
    pub fn set(&mut self, key: ParameterKey, value: f64) -> Result<()> {
        if !value.is_finite() {
            bail!("{} must be finite, got {}", key, value);
        }
        let value = if key.is_integer() {
            let rounded = value.round();
            if rounded < 0.0 || rounded > u32::MAX as f64 {
                bail!("{} must be a non-negative integer, got {}", key, value);
            }
            rounded
        } else {
            value
        };
        match key {
            ParameterKey::V0 => self.v0_mV = value,
            ParameterKey::Cm => self.cm_uF_per_mm2 = value,
            ParameterKey::GNaMax => self.g_na_max_mS_per_mm2 = value,
            ParameterKey::ENa => self.e_na_mV = value,
            ParameterKey::GKMax => self.g_k_max_mS_per_mm2 = value,
            ParameterKey::EK => self.e_k_mV = value,
            ParameterKey::GAMax => self.g_a_max_mS_per_mm2 = value,
            ParameterKey::EA => self.e_a_mV = value,
            ParameterKey::GL => self.g_l_mS_per_mm2 = value,
            ParameterKey::EL => self.e_l_mV = value,
            ParameterKey::Iapp => self.i_app_uA_per_mm2 = value,
            ParameterKey::Rate => self.rate_hz = value as u32,
        }
        Ok(())
    }

    /// Read a value in display units
    pub fn get_display(&self, key: ParameterKey) -> f64 {
        key.to_display(self.get(key))
    }

    /// Write a value given in display units
    pub fn set_display(&mut self, key: ParameterKey, display: f64) -> Result<()> {
        self.set(key, key.from_display(display))
    }

    /// Load from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading parameters from {}", path.display()))?;
        let params = serde_json::from_str(&contents)
            .with_context(|| format!("parsing parameters from {}", path.display()))?;
        log::info!("Loaded model parameters from {:?}", path);
        Ok(params)
    }

    /// Load from a JSON file or return defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(params) => {
                    log::info!("Loaded model parameters from {:?}", path.as_ref());
                    params
                }
                Err(e) => {
                    log::warn!("Failed to parse model parameters: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Model parameters file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Write as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, self)?;
        log::info!("Model parameters saved: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ModelParameters::default();
        assert_eq!(params.v0_mV, -65.0);
        assert_eq!(params.rate_hz, 40_000);
        assert_eq!(params.get_display(ParameterKey::Cm), 1.0);
        assert_eq!(params.get_display(ParameterKey::GNaMax), 120.0);
    }

    #[test]
    fn test_set_display_converts() {
        let mut params = ModelParameters::default();
        params.set_display(ParameterKey::GAMax, 20.0).unwrap();
        assert!((params.g_a_max_mS_per_mm2 - 0.2).abs() < 1e-15);
        params.set_display(ParameterKey::EK, -80.0).unwrap();
        assert_eq!(params.e_k_mV, -80.0);
    }

    #[test]
    fn test_rate_must_be_unsigned() {
        let mut params = ModelParameters::default();
        params.set(ParameterKey::Rate, 20_000.4).unwrap();
        assert_eq!(params.rate_hz, 20_000);
        assert!(params.set(ParameterKey::Rate, -1.0).is_err());
        assert!(params.set(ParameterKey::Cm, f64::NAN).is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let params: ModelParameters = serde_json::from_str(r#"{ "i_app_uA_per_mm2": 0.0 }"#).unwrap();
        assert_eq!(params.i_app_uA_per_mm2, 0.0);
        assert_eq!(params.g_na_max_mS_per_mm2, 1.2);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let params = ModelParameters::load_or_default("does/not/exist.json");
        assert_eq!(params, ModelParameters::default());
    }
}
