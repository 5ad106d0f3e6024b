//! Synthesis configuration.
//!
//! The generation pipeline is parameterized by the model configuration it was
//! trained with. Every field defaults to the published checkpoint values, so
//! a missing or partial `config.json` still yields a usable configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_quantization_channels() -> u32 {
    crate::codec::QUANTIZATION_CHANNELS
}

fn default_sample_rate() -> u32 {
    crate::audio::SAMPLE_RATE
}

fn default_sample_length() -> usize {
    64000
}

/// Configuration for decoding model output into audio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Number of mu-law quantization channels the model predicts over
    #[serde(default = "default_quantization_channels")]
    pub quantization_channels: u32,

    /// Output sample rate in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Number of samples per generated clip
    #[serde(default = "default_sample_length")]
    pub sample_length: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            quantization_channels: default_quantization_channels(),
            sample_rate: default_sample_rate(),
            sample_length: default_sample_length(),
        }
    }
}

impl SynthesisConfig {
    /// Load a configuration from a JSON file.
    ///
    /// Fields absent from the file take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }
}
