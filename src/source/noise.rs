use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::buffer::{SampleBuffer, validate_sample_rate};
use crate::error::{DspError, Result, Stage};

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Generate `length` independent N(mean, stddev²) samples
///
/// With `Some(seed)` the output is bit-reproducible: the generator is a
/// ChaCha8 stream seeded from `seed` and owned by this call. With `None`
/// the generator is seeded from the operating system and every call
/// returns different samples.
///
/// # Errors
/// `InvalidParameter` for a zero length, a negative or non-finite
/// standard deviation, a non-finite mean, or a bad sample rate.
pub fn generate_gaussian_noise(
    length: usize,
    mean: f64,
    stddev: f64,
    seed: Option<u64>,
    sample_rate: f64,
) -> Result<SampleBuffer> {
    let mut rng = create_rng(seed);
    generate_gaussian_noise_with_rng(length, mean, stddev, &mut rng, sample_rate)
}

/// Generate Gaussian noise from a caller-supplied generator
///
/// Lets callers share one seeded stream across several buffers, or plug
/// in any other `rand::Rng`.
pub fn generate_gaussian_noise_with_rng<R: Rng + ?Sized>(
    length: usize,
    mean: f64,
    stddev: f64,
    rng: &mut R,
    sample_rate: f64,
) -> Result<SampleBuffer> {
    validate_sample_rate(Stage::SignalSource, sample_rate)?;
    if length == 0 {
        return Err(DspError::parameter(
            Stage::SignalSource,
            "length",
            "must be at least one sample",
        ));
    }
    if !mean.is_finite() {
        return Err(DspError::parameter(
            Stage::SignalSource,
            "mean",
            format!("must be finite, got {}", mean),
        ));
    }
    if !stddev.is_finite() || stddev < 0.0 {
        return Err(DspError::parameter(
            Stage::SignalSource,
            "stddev",
            format!("must be non-negative and finite, got {}", stddev),
        ));
    }

    let normal = Normal::new(mean, stddev)
        .map_err(|e| DspError::parameter(Stage::SignalSource, "stddev", format!("{:?}", e)))?;

    let samples: Vec<f64> = (0..length).map(|_| normal.sample(rng)).collect();

    Ok(SampleBuffer::from_parts(samples, sample_rate))
}
