//! Mu-law encode/decode over scalar, slice, and tensor inputs.

use candle_core::{DType, Tensor};

use crate::error::{CodecError, Result};

/// Mu-law companding codec with a fixed channel count.
///
/// Decoding is a pure, memoryless, per-sample map: each code in
/// `[0, channels - 1]` is placed back onto `[-1, 1]` and pushed through the
/// inverse companding curve. No state is carried between samples, so batch
/// decoding is exactly elementwise decoding.
///
/// # Example
///
/// ```rust
/// use mulaw_codec::MuLawCodec;
///
/// # fn main() -> anyhow::Result<()> {
/// let codec = MuLawCodec::new(256)?;
/// assert_eq!(codec.decode_sample(0)?, -1.0);
/// assert_eq!(codec.decode_sample(255)?, 1.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MuLawCodec {
    /// Number of quantization channels (Q). The model emits codes in [0, Q-1].
    channels: u32,
}

impl MuLawCodec {
    /// Create a codec for the given quantization channel count.
    ///
    /// Fails with [`CodecError::InvalidChannelCount`] when `channels < 2`,
    /// since the companding curve is undefined for fewer than two levels.
    pub fn new(channels: u32) -> Result<Self> {
        if channels < 2 {
            return Err(CodecError::InvalidChannelCount(channels));
        }
        Ok(Self { channels })
    }

    /// Number of quantization channels.
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Decode a single quantized code to a sample in `[-1.0, 1.0]`.
    ///
    /// `code = 0` maps to -1.0 and `code = channels - 1` to 1.0; for odd
    /// channel counts the exact midpoint maps to 0.
    pub fn decode_sample(&self, code: u32) -> Result<f32> {
        if code >= self.channels {
            return Err(CodecError::CodeOutOfRange {
                code: i64::from(code),
                channels: self.channels,
            });
        }
        let mu = f64::from(self.channels - 1);
        // Map the code back to [-1, 1], then invert the companding curve.
        let signal = 2.0 * (f64::from(code) / mu) - 1.0;
        let magnitude = ((1.0 + mu).powf(signal.abs()) - 1.0) / mu;
        Ok((signal.signum() * magnitude) as f32)
    }

    /// Decode a sequence of quantized codes.
    ///
    /// Equivalent to [`decode_sample`](Self::decode_sample) applied to each
    /// element in order. The first out-of-range code aborts the decode.
    pub fn decode(&self, codes: &[u32]) -> Result<Vec<f32>> {
        codes.iter().map(|&code| self.decode_sample(code)).collect()
    }

    /// Decode a tensor of quantized codes elementwise.
    ///
    /// Accepts any integer dtype and preserves the input shape, so a
    /// `[batch, time]` tensor of model predictions decodes to a
    /// `[batch, time]` F32 waveform tensor. The whole tensor is validated
    /// against `[0, channels - 1]` before any arithmetic runs.
    ///
    /// # Arguments
    /// * `codes` - Integer tensor of quantized codes, any shape
    ///
    /// # Returns
    /// F32 tensor of samples in `[-1.0, 1.0]` with the same shape
    pub fn decode_tensor(&self, codes: &Tensor) -> anyhow::Result<Tensor> {
        if codes.elem_count() == 0 {
            return Ok(codes.to_dtype(DType::F32)?);
        }

        let flat = codes.to_dtype(DType::I64)?.flatten_all()?;
        let min = flat.min(0)?.to_scalar::<i64>()?;
        let max = flat.max(0)?.to_scalar::<i64>()?;
        if min < 0 || max >= i64::from(self.channels) {
            let code = if min < 0 { min } else { max };
            return Err(CodecError::CodeOutOfRange {
                code,
                channels: self.channels,
            }
            .into());
        }

        let mu = f64::from(self.channels - 1);
        // signal = 2 * (code / mu) - 1
        let signal = codes.to_dtype(DType::F32)?.affine(2.0 / mu, -1.0)?;
        // (1 + mu)^|signal| as exp(|signal| * ln(1 + mu))
        let powered = (signal.abs()? * (1.0 + mu).ln())?.exp()?;
        // magnitude = ((1 + mu)^|signal| - 1) / mu
        let magnitude = powered.affine(1.0 / mu, -1.0 / mu)?;
        let negated = magnitude.neg()?;
        let zeros = Tensor::zeros(signal.shape(), signal.dtype(), signal.device())?;
        Ok(signal.lt(&zeros)?.where_cond(&negated, &magnitude)?)
    }

    /// Encode a sample to a quantized code in `[0, channels - 1]`.
    ///
    /// Applies the forward companding curve, then uniform quantization.
    /// Input outside `[-1.0, 1.0]` is clamped, matching the normalization
    /// contract of the audio pipeline.
    pub fn encode_sample(&self, sample: f32) -> u32 {
        let mu = f64::from(self.channels - 1);
        let x = f64::from(sample).clamp(-1.0, 1.0);
        let signal = x.signum() * (1.0 + mu * x.abs()).ln() / (1.0 + mu).ln();
        // [-1, 1] -> [0, mu], rounding to the nearest level
        ((signal + 1.0) / 2.0 * mu + 0.5).floor() as u32
    }

    /// Encode a sequence of samples elementwise.
    pub fn encode(&self, samples: &[f32]) -> Vec<u32> {
        samples
            .iter()
            .map(|&sample| self.encode_sample(sample))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::Device;

    #[test]
    fn rejects_degenerate_channel_counts() {
        assert_eq!(
            MuLawCodec::new(0),
            Err(CodecError::InvalidChannelCount(0))
        );
        assert_eq!(
            MuLawCodec::new(1),
            Err(CodecError::InvalidChannelCount(1))
        );
        assert!(MuLawCodec::new(2).is_ok());
    }

    #[test]
    fn boundary_codes_decode_to_full_scale() {
        for channels in [2u32, 3, 16, 256, 1024] {
            let codec = MuLawCodec::new(channels).unwrap();
            assert_eq!(codec.decode_sample(0).unwrap(), -1.0);
            assert_eq!(codec.decode_sample(channels - 1).unwrap(), 1.0);
        }
    }

    #[test]
    fn odd_channel_midpoint_decodes_to_zero() {
        let codec = MuLawCodec::new(257).unwrap();
        assert_eq!(codec.decode_sample(128).unwrap(), 0.0);

        let codec = MuLawCodec::new(3).unwrap();
        assert_eq!(codec.decode_sample(1).unwrap(), 0.0);
    }

    #[test]
    fn codes_around_even_midpoint_are_near_zero() {
        // 255/2 is not integral, so neither neighbor lands exactly on zero.
        let codec = MuLawCodec::new(256).unwrap();
        let below = codec.decode_sample(127).unwrap();
        let above = codec.decode_sample(128).unwrap();
        assert!(below < 0.0 && below > -1e-3, "decode(127) = {below}");
        assert!(above > 0.0 && above < 1e-3, "decode(128) = {above}");
        assert!((below + above).abs() < 1e-7);
    }

    #[test]
    fn out_of_range_code_is_rejected() {
        let codec = MuLawCodec::new(256).unwrap();
        assert_eq!(
            codec.decode_sample(256),
            Err(CodecError::CodeOutOfRange {
                code: 256,
                channels: 256
            })
        );
        assert!(codec.decode(&[0, 1, 9999]).is_err());
    }

    #[test]
    fn slice_decode_matches_per_sample_decode() {
        let codec = MuLawCodec::new(256).unwrap();
        let codes: Vec<u32> = (0..256).collect();
        let decoded = codec.decode(&codes).unwrap();
        for (&code, &sample) in codes.iter().zip(decoded.iter()) {
            assert_eq!(codec.decode_sample(code).unwrap(), sample);
        }
    }

    #[test]
    fn encode_hits_boundary_codes() {
        let codec = MuLawCodec::new(256).unwrap();
        assert_eq!(codec.encode_sample(-1.0), 0);
        assert_eq!(codec.encode_sample(1.0), 255);
        // Out-of-range input clamps rather than overflowing the code space.
        assert_eq!(codec.encode_sample(-2.5), 0);
        assert_eq!(codec.encode_sample(2.5), 255);
    }

    #[test]
    fn tensor_decode_matches_slice_decode() {
        let device = Device::Cpu;
        let codec = MuLawCodec::new(256).unwrap();
        let codes: Vec<u32> = (0..256).collect();

        let expected = codec.decode(&codes).unwrap();
        let tensor = Tensor::new(codes.as_slice(), &device).unwrap();
        let actual: Vec<f32> = codec
            .decode_tensor(&tensor)
            .unwrap()
            .to_vec1()
            .unwrap();

        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < 1e-5, "tensor {a} vs slice {e}");
        }
    }

    #[test]
    fn tensor_decode_preserves_shape() {
        let device = Device::Cpu;
        let codec = MuLawCodec::new(256).unwrap();
        let tensor = Tensor::new(&[[0u32, 128, 255], [255, 128, 0]], &device).unwrap();

        let decoded = codec.decode_tensor(&tensor).unwrap();
        assert_eq!(decoded.dims(), &[2, 3]);
        assert_eq!(decoded.dtype(), DType::F32);
    }

    #[test]
    fn tensor_decode_rejects_out_of_range() {
        let device = Device::Cpu;
        let codec = MuLawCodec::new(256).unwrap();

        let high = Tensor::new(&[0u32, 300], &device).unwrap();
        assert!(codec.decode_tensor(&high).is_err());

        let negative = Tensor::new(&[-1i64, 4], &device).unwrap();
        assert!(codec.decode_tensor(&negative).is_err());
    }
}
