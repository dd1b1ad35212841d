//! White noise from random frequencies.
//!
//! Each output sample is a point on a sine wave whose frequency is picked
//! from the fetched sequence by sample index, wrapping around when the
//! sequence is shorter than the clip.

use std::f64::consts::PI;
use std::path::Path;

use crate::error::ArtifactError;
use crate::fetcher::Fetcher;
use crate::transport::Transport;

/// Bits per PCM sample in the output file.
pub const BITS_PER_SAMPLE: u16 = 16;

/// Clip parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseConfig {
    /// Samples per second.
    pub sampling_rate: u32,
    /// Clip length in seconds.
    pub duration_secs: u32,
    /// Lowest frequency drawn, in Hz.
    pub min_freq: u32,
    /// Highest frequency drawn, in Hz.
    pub max_freq: u32,
    /// Peak amplitude as a fraction of full scale, in `(0, 1]`.
    pub amplitude: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            sampling_rate: 44_100,
            duration_secs: 1,
            min_freq: 20,
            max_freq: 20_000,
            amplitude: 0.5,
        }
    }
}

impl NoiseConfig {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.sampling_rate == 0 || self.duration_secs == 0 {
            return Err(ArtifactError::NoiseConfig(
                "sampling rate and duration must be positive".into(),
            ));
        }
        if self.min_freq > self.max_freq {
            return Err(ArtifactError::NoiseConfig(format!(
                "min_freq {} is greater than max_freq {}",
                self.min_freq, self.max_freq
            )));
        }
        if !(self.amplitude > 0.0 && self.amplitude <= 1.0) {
            return Err(ArtifactError::NoiseConfig(format!(
                "amplitude {} is outside (0, 1]",
                self.amplitude
            )));
        }
        Ok(())
    }

    /// Number of random frequencies to fetch: one per time slot of a second.
    pub fn frequency_count(&self) -> usize {
        (self.sampling_rate as u64 * self.duration_secs as u64 / self.duration_secs as u64) as usize
    }

    /// Total samples in the clip.
    pub fn sample_count(&self) -> usize {
        self.sampling_rate as usize * self.duration_secs as usize
    }

    fn wav_spec(&self) -> hound::WavSpec {
        hound::WavSpec {
            channels: 1,
            sample_rate: self.sampling_rate,
            bits_per_sample: BITS_PER_SAMPLE,
            sample_format: hound::SampleFormat::Int,
        }
    }
}

/// Build the clip's samples from a sequence of frequencies.
pub fn white_noise_samples(
    frequencies: &[i64],
    config: &NoiseConfig,
) -> Result<Vec<i16>, ArtifactError> {
    config.validate()?;
    if frequencies.is_empty() {
        return Err(ArtifactError::NoiseConfig(
            "at least one frequency is required".into(),
        ));
    }

    let rate = config.sampling_rate as f64;
    let peak = config.amplitude * i16::MAX as f64;
    let samples = (0..config.sample_count())
        .map(|i| {
            let freq = frequencies[i % frequencies.len()] as f64;
            let value = peak * (2.0 * PI * freq * i as f64 / rate).sin();
            value.round() as i16
        })
        .collect();
    Ok(samples)
}

/// Write mono 16-bit PCM to `path`.
pub fn write_wav(path: &Path, samples: &[i16], config: &NoiseConfig) -> Result<(), ArtifactError> {
    let mut writer = hound::WavWriter::create(path, config.wav_spec())?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    log::info!(
        "wrote {} samples at {} Hz to {}",
        samples.len(),
        config.sampling_rate,
        path.display()
    );
    Ok(())
}

/// Fetch random frequencies, synthesise the clip and write it to `path`.
///
/// Nothing is written if the fetch fails.
pub fn build_noise<T: Transport>(
    fetcher: &Fetcher<T>,
    config: &NoiseConfig,
    path: &Path,
) -> Result<Vec<i16>, ArtifactError> {
    config.validate()?;
    let frequencies = fetcher.integers(
        config.frequency_count(),
        config.min_freq as i64,
        config.max_freq as i64,
    )?;
    let samples = white_noise_samples(&frequencies, config)?;
    write_wav(path, &samples, config)?;
    Ok(samples)
}
