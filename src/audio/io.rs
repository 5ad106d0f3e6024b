//! Waveform buffer and WAV persistence.

use anyhow::{Context, Result};
use candle_core::{Device, Tensor};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

/// Mono waveform of normalized floating-point samples.
///
/// This is the output type of mu-law decoding. Samples are 32-bit floats in
/// `[-1.0, 1.0]`; the sample rate is carried alongside so the buffer can be
/// persisted without further context.
///
/// # Example
///
/// ```rust
/// use mulaw_codec::Waveform;
///
/// let waveform = Waveform::new(vec![0.0; 16000], 16000);
/// assert!((waveform.duration() - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Samples in `[-1.0, 1.0]`
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl Waveform {
    /// Create a waveform from raw samples.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Create from a tensor of any shape; the tensor is flattened to mono.
    pub fn from_tensor(tensor: &Tensor, sample_rate: u32) -> Result<Self> {
        let samples: Vec<f32> = tensor.flatten_all()?.to_vec1()?;
        Ok(Self::new(samples, sample_rate))
    }

    /// Convert to a 1-D F32 tensor on the given device.
    pub fn to_tensor(&self, device: &Device) -> Result<Tensor> {
        Ok(Tensor::new(self.samples.as_slice(), device)?)
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the waveform holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Scale the waveform so its peak sits at full scale.
    ///
    /// Silence is left untouched.
    pub fn peak_normalize(&mut self) {
        let peak = self.samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
        if peak > 0.0 && peak != 1.0 {
            for sample in &mut self.samples {
                *sample /= peak;
            }
        }
    }

    /// Save to a 16-bit PCM WAV file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_wav(path, &self.samples, self.sample_rate)
    }

    /// Load from a WAV file, downmixing to mono if needed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_wav(path)
    }
}

/// Save samples to a mono 16-bit PCM WAV file.
pub fn save_wav<P: AsRef<Path>>(path: P, samples: &[f32], sample_rate: u32) -> Result<()> {
    let path = path.as_ref();
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV at {}", path.display()))?;
    for &sample in samples {
        let scaled = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer.write_sample(scaled)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Load a WAV file into a mono [`Waveform`].
///
/// Integer PCM is rescaled to `[-1.0, 1.0]`; multi-channel audio is
/// downmixed by averaging channels.
pub fn load_wav<P: AsRef<Path>>(path: P) -> Result<Waveform> {
    let path = path.as_ref();
    let reader = WavReader::open(path)
        .with_context(|| format!("Failed to open WAV at {}", path.display()))?;

    let spec = reader.spec();
    let channel_count = spec.channels as usize;

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let full_scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / full_scale))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let mono = if channel_count > 1 {
        samples
            .chunks(channel_count)
            .map(|frame| frame.iter().sum::<f32>() / channel_count as f32)
            .collect()
    } else {
        samples
    };

    Ok(Waveform::new(mono, spec.sample_rate))
}
