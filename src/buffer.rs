use crate::error::{DspError, Result, Stage};

/// Mono sample buffer with its sample rate
///
/// Always holds at least one sample and a positive, finite sample rate.
/// Buffers are never mutated once built; every stage returns a new one.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f64>,
    sample_rate: f64,
}

/// Output of FIR filtering. Same shape as its input.
pub type FilteredBuffer = SampleBuffer;

impl SampleBuffer {
    /// Wrap samples recorded at `sample_rate` Hz
    ///
    /// # Errors
    /// `InvalidInput` for an empty vector, `InvalidParameter` for a
    /// non-positive or non-finite sample rate.
    pub fn new(samples: Vec<f64>, sample_rate: f64) -> Result<Self> {
        validate_sample_rate(Stage::Pipeline, sample_rate)?;
        if samples.is_empty() {
            return Err(DspError::input(
                Stage::Pipeline,
                "sample buffer must hold at least one sample",
            ));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    pub(crate) fn from_parts(samples: Vec<f64>, sample_rate: f64) -> Self {
        debug_assert!(!samples.is_empty());
        debug_assert!(sample_rate > 0.0);
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration covered by the buffer in seconds (N / fs)
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Time of each sample, k / fs
    pub fn times(&self) -> Vec<f64> {
        (0..self.samples.len())
            .map(|k| k as f64 / self.sample_rate)
            .collect()
    }

    /// Element-wise sum, e.g. signal + noise
    ///
    /// # Errors
    /// `InvalidInput` if lengths or sample rates differ.
    pub fn add(&self, other: &SampleBuffer) -> Result<SampleBuffer> {
        if self.len() != other.len() {
            return Err(DspError::input(
                Stage::Pipeline,
                format!(
                    "cannot add buffers of different length ({} vs {})",
                    self.len(),
                    other.len()
                ),
            ));
        }
        if self.sample_rate != other.sample_rate {
            return Err(DspError::input(
                Stage::Pipeline,
                format!(
                    "cannot add buffers of different sample rate ({} vs {} Hz)",
                    self.sample_rate, other.sample_rate
                ),
            ));
        }

        let samples = self
            .samples
            .iter()
            .zip(other.samples.iter())
            .map(|(a, b)| a + b)
            .collect();
        Ok(Self::from_parts(samples, self.sample_rate))
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

impl AsRef<[f64]> for SampleBuffer {
    fn as_ref(&self) -> &[f64] {
        &self.samples
    }
}

pub(crate) fn validate_sample_rate(stage: Stage, sample_rate: f64) -> Result<()> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(DspError::parameter(
            stage,
            "sample_rate",
            format!("must be positive and finite, got {}", sample_rate),
        ));
    }
    Ok(())
}
