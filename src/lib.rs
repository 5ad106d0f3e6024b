//! # mulaw-codec
//!
//! Mu-law waveform decoding for neural audio synthesis.
//!
//! WaveNet-style autoencoders predict audio one sample at a time as a
//! classification over Q quantization channels (256 in the published
//! checkpoints). This crate turns those quantized predictions back into
//! audible audio:
//!
//! 1. **[`MuLawCodec`]**: inverts the mu-law companding curve, mapping
//!    integer codes in `[0, Q-1]` to f32 samples in `[-1.0, 1.0]`. Works on
//!    single samples, slices, and batched candle tensors. The forward
//!    (encoding) direction is provided for preparing training targets.
//!
//! 2. **[`Waveform`]**: the decoded audio buffer, with peak normalization
//!    and 16-bit PCM WAV persistence.
//!
//! 3. **[`Synthesizer`]**: ties the two together the way a generation run
//!    does: decode a batch of model predictions and write the clips into a
//!    save directory, driven by a [`SynthesisConfig`] loaded from the model
//!    directory.
//!
//! The model itself (encoder, decoder, training loop, checkpointing) is an
//! external collaborator; this crate begins where inference ends, at the
//! quantized output layer.
//!
//! ## Quick Start
//!
//! ```rust
//! use mulaw_codec::{SynthesisConfig, Synthesizer};
//!
//! # fn main() -> anyhow::Result<()> {
//! let synthesizer = Synthesizer::new(SynthesisConfig::default())?;
//!
//! // Quantized predictions from the model's output layer.
//! let codes: Vec<u32> = vec![0, 64, 128, 192, 255];
//!
//! let waveform = synthesizer.decode(&codes)?;
//! assert!(waveform.samples.iter().all(|s| (-1.0..=1.0).contains(s)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error handling
//!
//! Codec preconditions (a channel count below 2, a code outside `[0, Q-1]`)
//! are rejected eagerly with a typed [`CodecError`] rather than clamped, so
//! out-of-range model output surfaces at the decode boundary. I/O paths
//! return [`anyhow::Result`] with path context.

pub mod audio;
pub mod codec;
pub mod config;
pub mod error;
pub mod synthesis;

pub use audio::{load_wav, save_wav, Waveform, SAMPLE_RATE};
pub use codec::{MuLawCodec, QUANTIZATION_CHANNELS};
pub use config::SynthesisConfig;
pub use error::CodecError;
pub use synthesis::Synthesizer;
