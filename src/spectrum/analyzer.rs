use num_complex::Complex;

use super::fft::{FftAlgorithm, dft};
use crate::buffer::SampleBuffer;
use crate::error::{DspError, Result, Stage};

/// One frequency bin of a spectrum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumBin {
    pub index: usize,
    pub frequency: f64,
    pub magnitude: f64,
}

/// N-point DFT of a real buffer together with its frequency axis
///
/// Bins are in standard FFT order: non-negative frequencies first, then
/// the negative ones starting at -fs/2 (even N) or just above it (odd N).
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencySpectrum {
    coefficients: Vec<Complex<f64>>,
    frequencies: Vec<f64>,
    sample_rate: f64,
}

impl FrequencySpectrum {
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// Never true for a spectrum produced by [`transform`]
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Spacing between bins, fs / N
    pub fn bin_width(&self) -> f64 {
        self.sample_rate / self.coefficients.len() as f64
    }

    pub fn coefficients(&self) -> &[Complex<f64>] {
        &self.coefficients
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// |X[k]| for every bin, in FFT order
    pub fn magnitudes(&self) -> Vec<f64> {
        self.coefficients.iter().map(|c| c.norm()).collect()
    }

    pub fn bin(&self, index: usize) -> Option<SpectrumBin> {
        let coefficient = self.coefficients.get(index)?;
        Some(SpectrumBin {
            index,
            frequency: self.frequencies[index],
            magnitude: coefficient.norm(),
        })
    }

    /// Non-negative, non-aliased half: bins k in [0, N/2)
    ///
    /// A single-sample spectrum still yields its DC bin.
    pub fn positive_half(&self) -> Vec<SpectrumBin> {
        let count = (self.coefficients.len() / 2).max(1);
        (0..count).filter_map(|k| self.bin(k)).collect()
    }

    /// Largest-magnitude bin of the positive half; the lowest index wins ties
    pub fn peak(&self) -> Option<SpectrumBin> {
        self.positive_half()
            .into_iter()
            .fold(None, |best: Option<SpectrumBin>, bin| match best {
                Some(b) if b.magnitude >= bin.magnitude => Some(b),
                _ => Some(bin),
            })
    }
}

/// Frequency of each FFT bin for an N-point transform at `sample_rate`
///
/// Bin k maps to k·fs/N in the lower half and (k - N)·fs/N in the upper
/// half, matching the usual `fftfreq` layout.
pub fn fft_frequencies(n: usize, sample_rate: f64) -> Vec<f64> {
    let width = sample_rate / n as f64;
    let positive = n.div_ceil(2);
    (0..n)
        .map(|k| {
            if k < positive {
                k as f64 * width
            } else {
                (k as f64 - n as f64) * width
            }
        })
        .collect()
}

/// Compute the spectrum of a real sample buffer
///
/// # Errors
/// `InvalidInput` for an empty buffer, `NumericalInstability` if any
/// sample is NaN or infinite.
pub fn transform(buffer: &SampleBuffer) -> Result<FrequencySpectrum> {
    transform_samples(buffer.samples(), buffer.sample_rate())
}

pub(crate) fn transform_samples(samples: &[f64], sample_rate: f64) -> Result<FrequencySpectrum> {
    if samples.is_empty() {
        return Err(DspError::input(
            Stage::SpectrumAnalyzer,
            "cannot transform an empty buffer",
        ));
    }
    if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
        return Err(DspError::NumericalInstability {
            stage: Stage::SpectrumAnalyzer,
            reason: format!("sample {} is {}", index, samples[index]),
        });
    }

    let n = samples.len();
    log::debug!(
        "Transforming {} samples at {} Hz using {:?}",
        n,
        sample_rate,
        FftAlgorithm::for_len(n)
    );

    let input: Vec<Complex<f64>> = samples.iter().map(|&x| Complex::new(x, 0.0)).collect();
    let coefficients = dft(&input);

    Ok(FrequencySpectrum {
        coefficients,
        frequencies: fft_frequencies(n, sample_rate),
        sample_rate,
    })
}
