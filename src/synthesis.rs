//! Decoding model output into audible waveforms.
//!
//! The tail of a generation run: quantized predictions from the model's
//! output layer are mu-law decoded and written out as 16-bit PCM WAV files
//! in a save directory that is created on demand.

use anyhow::{Context, Result};
use candle_core::{IndexOp, Tensor};
use std::path::{Path, PathBuf};

use crate::audio::Waveform;
use crate::codec::MuLawCodec;
use crate::config::SynthesisConfig;

/// Decodes quantized model output and persists it as WAV audio.
///
/// # Example
///
/// ```rust
/// use mulaw_codec::{SynthesisConfig, Synthesizer};
///
/// # fn main() -> anyhow::Result<()> {
/// let synthesizer = Synthesizer::new(SynthesisConfig::default())?;
/// let waveform = synthesizer.decode(&[0, 64, 128, 192, 255])?;
/// assert_eq!(waveform.sample_rate, 16000);
/// # Ok(())
/// # }
/// ```
pub struct Synthesizer {
    codec: MuLawCodec,
    config: SynthesisConfig,
}

impl Synthesizer {
    /// Build a synthesizer from a model configuration.
    ///
    /// Fails when the configured quantization channel count is invalid.
    pub fn new(config: SynthesisConfig) -> Result<Self> {
        let codec = MuLawCodec::new(config.quantization_channels)?;
        Ok(Self { codec, config })
    }

    /// The underlying codec.
    pub fn codec(&self) -> &MuLawCodec {
        &self.codec
    }

    /// The configuration this synthesizer was built from.
    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Decode one sequence of quantized codes into a waveform.
    pub fn decode(&self, codes: &[u32]) -> Result<Waveform> {
        let samples = self.codec.decode(codes)?;
        if samples.len() != self.config.sample_length {
            tracing::debug!(
                "decoded {} samples, configured clip length is {}",
                samples.len(),
                self.config.sample_length
            );
        }
        Ok(Waveform::new(samples, self.config.sample_rate))
    }

    /// Decode a batch of sequences, one waveform per sequence.
    ///
    /// Sequences are decoded independently and results keep the input order.
    pub fn decode_batch(&self, batch: &[Vec<u32>]) -> Result<Vec<Waveform>> {
        batch.iter().map(|codes| self.decode(codes)).collect()
    }

    /// Decode a `[batch, time]` tensor of predictions, one waveform per row.
    pub fn decode_tensor(&self, codes: &Tensor) -> Result<Vec<Waveform>> {
        let decoded = self.codec.decode_tensor(codes)?;
        let (batch, _time) = decoded.dims2()?;

        let mut waveforms = Vec::with_capacity(batch);
        for row in 0..batch {
            let samples = decoded.i(row)?;
            waveforms.push(Waveform::from_tensor(&samples, self.config.sample_rate)?);
        }
        Ok(waveforms)
    }

    /// Write a waveform under `save_dir`, creating the directory if needed.
    ///
    /// Returns the path of the written file.
    pub fn write_wav<P: AsRef<Path>>(
        &self,
        waveform: &Waveform,
        save_dir: P,
        name: &str,
    ) -> Result<PathBuf> {
        let save_dir = save_dir.as_ref();
        if !save_dir.exists() {
            tracing::info!("Creating save directory {}", save_dir.display());
            std::fs::create_dir_all(save_dir).with_context(|| {
                format!("Failed to create save directory {}", save_dir.display())
            })?;
        }

        let path = save_dir.join(name);
        waveform.save(&path)?;
        tracing::info!("Wrote wav file to {}", path.display());
        Ok(path)
    }
}
