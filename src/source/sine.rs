use std::f64::consts::PI;

use crate::buffer::{SampleBuffer, validate_sample_rate};
use crate::constants::MAX_SAMPLES;
use crate::error::{DspError, Result, Stage};

/// Generate a sampled sine wave
///
/// Produces N = round(sample_rate · duration) samples of sin(2π·f·t) at
/// t = k / sample_rate for k in [0, N). The interval is half-open, so the
/// sample at t = duration is not included.
///
/// # Errors
/// `InvalidParameter` if the sample rate or duration is not positive, the
/// frequency is negative, any argument is non-finite, or the product
/// rounds to zero samples or to more than [`MAX_SAMPLES`].
pub fn generate_sine(
    sample_rate: f64,
    duration_secs: f64,
    frequency_hz: f64,
) -> Result<SampleBuffer> {
    validate_sample_rate(Stage::SignalSource, sample_rate)?;
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return Err(DspError::parameter(
            Stage::SignalSource,
            "duration",
            format!("must be positive and finite, got {}", duration_secs),
        ));
    }
    if !frequency_hz.is_finite() || frequency_hz < 0.0 {
        return Err(DspError::parameter(
            Stage::SignalSource,
            "frequency",
            format!("must be non-negative and finite, got {}", frequency_hz),
        ));
    }

    let count = (sample_rate * duration_secs).round();
    if count > MAX_SAMPLES as f64 {
        return Err(DspError::parameter(
            Stage::SignalSource,
            "duration",
            format!(
                "{} s at {} Hz needs {} samples, limit is {}",
                duration_secs, sample_rate, count, MAX_SAMPLES
            ),
        ));
    }
    let num_samples = count as usize;
    if num_samples == 0 {
        return Err(DspError::parameter(
            Stage::SignalSource,
            "duration",
            format!("{} s at {} Hz yields no samples", duration_secs, sample_rate),
        ));
    }

    let omega = 2.0 * PI * frequency_hz;
    let samples = (0..num_samples)
        .map(|k| {
            let t = k as f64 / sample_rate;
            (omega * t).sin()
        })
        .collect();

    log::trace!(
        "Generated {} samples of {} Hz sine at {} Hz",
        num_samples,
        frequency_hz,
        sample_rate
    );

    Ok(SampleBuffer::from_parts(samples, sample_rate))
}
