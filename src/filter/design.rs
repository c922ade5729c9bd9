use num_complex::Complex;
use std::f64::consts::PI;

use super::window::{WindowType, generate_window};
use crate::buffer::validate_sample_rate;
use crate::constants::{MIN_POWER_THRESHOLD, SINC_EPSILON};
use crate::error::{DspError, Result, Stage};

/// FIR coefficients with the design context they were built for
///
/// Always odd-length. Taps from [`design_lowpass_fir`] are also symmetric
/// about the center (linear phase) and sum to 1.0 (unity DC gain).
#[derive(Debug, Clone, PartialEq)]
pub struct FilterTaps {
    coefficients: Vec<f64>,
    sample_rate: f64,
}

impl FilterTaps {
    /// Wrap externally designed coefficients
    ///
    /// # Errors
    /// `InvalidParameter` if the tap count is zero or even, a coefficient is
    /// non-finite, or the sample rate is invalid.
    pub fn from_coefficients(coefficients: Vec<f64>, sample_rate: f64) -> Result<Self> {
        validate_sample_rate(Stage::FilterDesigner, sample_rate)?;
        validate_numtaps(coefficients.len())?;
        if let Some(index) = coefficients.iter().position(|c| !c.is_finite()) {
            return Err(DspError::parameter(
                Stage::FilterDesigner,
                "coefficients",
                format!("tap {} is {}", index, coefficients[index]),
            ));
        }
        Ok(Self {
            coefficients,
            sample_rate,
        })
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Get the number of taps (filter length)
    pub fn num_taps(&self) -> usize {
        self.coefficients.len()
    }

    /// Get the group delay in samples (half the filter length for linear phase)
    pub fn group_delay_samples(&self) -> usize {
        (self.coefficients.len() - 1) / 2
    }

    /// Sum of the taps, i.e. the gain at 0 Hz
    pub fn dc_gain(&self) -> f64 {
        self.coefficients.iter().sum()
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.coefficients.len();
        (0..n / 2).all(|k| self.coefficients[k] == self.coefficients[n - 1 - k])
    }

    /// H(e^{jω}) at `frequency_hz`, ω = 2π·f/fs
    pub fn frequency_response(&self, frequency_hz: f64) -> Complex<f64> {
        let omega = 2.0 * PI * frequency_hz / self.sample_rate;
        self.coefficients
            .iter()
            .enumerate()
            .map(|(n, &h)| Complex::from_polar(h, -omega * n as f64))
            .sum()
    }

    /// 20·log10|H| at `frequency_hz`
    pub fn magnitude_db(&self, frequency_hz: f64) -> f64 {
        let magnitude = self.frequency_response(frequency_hz).norm();
        20.0 * magnitude.max(MIN_POWER_THRESHOLD).log10()
    }
}

/// Normalized sinc, sin(πx)/(πx) with sinc(0) = 1
pub fn sinc(x: f64) -> f64 {
    if x.abs() < SINC_EPSILON {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

/// Design a Hamming-windowed-sinc low-pass filter
///
/// # Arguments
/// * `numtaps` - Number of filter taps (must be odd for Type I linear phase)
/// * `cutoff_hz` - Cutoff frequency in Hz, strictly between 0 and Nyquist
/// * `sample_rate` - Sample rate in Hz
///
/// `numtaps = 1` degenerates to a single unity tap (pass-through).
///
/// # Errors
/// Returns `DspError::InvalidParameter` if the parameters are invalid
pub fn design_lowpass_fir(
    numtaps: usize,
    cutoff_hz: f64,
    sample_rate: f64,
) -> Result<FilterTaps> {
    design_lowpass_fir_with_window(numtaps, cutoff_hz, sample_rate, WindowType::Hamming)
}

/// Windowed-sinc low-pass design with a selectable window
///
/// 1. fc = cutoff / (fs/2), the cutoff as a fraction of Nyquist
/// 2. h[n] = fc·sinc(fc·(n - m)) with m = (numtaps - 1)/2
/// 3. h[n] *= w[n]
/// 4. scale so Σh = 1
pub fn design_lowpass_fir_with_window(
    numtaps: usize,
    cutoff_hz: f64,
    sample_rate: f64,
    window: WindowType,
) -> Result<FilterTaps> {
    validate_sample_rate(Stage::FilterDesigner, sample_rate)?;
    validate_numtaps(numtaps)?;

    let nyquist = sample_rate / 2.0;
    if !cutoff_hz.is_finite() || cutoff_hz <= 0.0 || cutoff_hz >= nyquist {
        return Err(DspError::parameter(
            Stage::FilterDesigner,
            "cutoff",
            format!(
                "must be in (0, {}) Hz for sample rate {} Hz, got {}",
                nyquist, sample_rate, cutoff_hz
            ),
        ));
    }

    let fc = cutoff_hz / nyquist;
    let center = (numtaps - 1) / 2;
    let w = generate_window(window, numtaps);

    // Fill the first half and mirror it so the taps are exactly symmetric
    let mut h = vec![0.0; numtaps];
    for n in 0..=center {
        let offset = n as f64 - center as f64;
        let value = fc * sinc(fc * offset) * w[n];
        h[n] = value;
        h[numtaps - 1 - n] = value;
    }

    let sum: f64 = h.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        return Err(DspError::NumericalInstability {
            stage: Stage::FilterDesigner,
            reason: format!("tap sum {} cannot be normalized", sum),
        });
    }
    for tap in h.iter_mut() {
        *tap /= sum;
    }

    log::debug!(
        "Designed {}-tap {} low-pass: cutoff {} Hz at {} Hz (fc = {:.4} of Nyquist)",
        numtaps,
        window,
        cutoff_hz,
        sample_rate,
        fc
    );

    Ok(FilterTaps {
        coefficients: h,
        sample_rate,
    })
}

fn validate_numtaps(numtaps: usize) -> Result<()> {
    if numtaps == 0 || numtaps.is_multiple_of(2) {
        return Err(DspError::parameter(
            Stage::FilterDesigner,
            "numtaps",
            format!("must be odd and positive, got {}", numtaps),
        ));
    }
    Ok(())
}
