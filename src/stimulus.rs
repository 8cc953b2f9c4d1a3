//! Stimulus current supplied to the neuron on each tick.
//!
//! Amplitudes are in amperes, in the host's sign convention: the sample is
//! subtracted in the current balance, so a negative value is inward
//! (depolarizing).

use anyhow::{ensure, Result};
use rand::prelude::*;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

/// Stimulus protocol
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stimulus {
    /// No external current
    #[default]
    None,
    /// Constant current
    Constant {
        /// Amplitude (A)
        amplitude_A: f64,
    },
    /// Rectangular pulse
    Pulse {
        /// Start of the pulse (s)
        onset_sec: f64,
        /// Pulse width (s)
        duration_sec: f64,
        /// Amplitude (A)
        amplitude_A: f64,
    },
    /// Gaussian white noise, one independent sample per tick
    Noise {
        /// Mean (A)
        mean_A: f64,
        /// Standard deviation (A)
        std_A: f64,
        /// RNG seed
        seed: u64,
    },
}

/// Produces stimulus samples for a [`Stimulus`] protocol
#[derive(Debug, Clone)]
pub struct StimulusSource {
    stimulus: Stimulus,
    rng: StdRng,
    noise: Option<Normal<f64>>,
}

impl StimulusSource {
    /// Create a source; fails for a negative or non-finite noise deviation
    pub fn new(stimulus: Stimulus) -> Result<Self> {
        let (seed, noise) = match stimulus {
            Stimulus::Noise { mean_A, std_A, seed } => {
                ensure!(
                    std_A.is_finite() && std_A >= 0.0,
                    "noise standard deviation must be finite and non-negative, got {}",
                    std_A
                );
                (seed, Some(Normal::new(mean_A, std_A)?))
            }
            _ => (0, None),
        };

        Ok(Self {
            stimulus,
            rng: StdRng::seed_from_u64(seed),
            noise,
        })
    }

    /// Protocol this source plays
    pub fn stimulus(&self) -> &Stimulus {
        &self.stimulus
    }

    /// Sample for the tick starting at `time_sec` (A)
    pub fn sample(&mut self, time_sec: f64) -> f64 {
        match self.stimulus {
            Stimulus::None => 0.0,
            Stimulus::Constant { amplitude_A } => amplitude_A,
            Stimulus::Pulse {
                onset_sec,
                duration_sec,
                amplitude_A,
            } => {
                if time_sec >= onset_sec && time_sec < onset_sec + duration_sec {
                    amplitude_A
                } else {
                    0.0
                }
            }
            Stimulus::Noise { .. } => match &self.noise {
                Some(dist) => self.rng.sample(dist),
                None => 0.0,
            },
        }
    }
}
