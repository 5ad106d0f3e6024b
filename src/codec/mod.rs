//! Mu-law companding codec
//!
//! WaveNet-family vocoders predict one of Q discrete amplitude classes per
//! sample instead of a raw float. The classes are spaced along a logarithmic
//! (mu-law) curve, which spends quantization precision where hearing is most
//! sensitive: near zero amplitude. This module converts between those
//! discrete codes and normalized floating-point samples.

mod mulaw;

pub use mulaw::MuLawCodec;

/// Channel count used by the published model checkpoints (8-bit mu-law).
pub const QUANTIZATION_CHANNELS: u32 = 256;
