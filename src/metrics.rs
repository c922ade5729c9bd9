//! Power and level measurements over sample slices

use crate::constants::MIN_POWER_THRESHOLD;

/// Mean of the squared samples. Zero for an empty slice.
pub fn signal_power(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().map(|&x| x * x).sum::<f64>() / signal.len() as f64
}

pub fn rms(signal: &[f64]) -> f64 {
    signal_power(signal).sqrt()
}

/// Power ratio in dB, 10·log10(numerator / denominator)
pub fn ratio_db(numerator_power: f64, denominator_power: f64) -> f64 {
    10.0 * (numerator_power.max(MIN_POWER_THRESHOLD) / denominator_power.max(MIN_POWER_THRESHOLD))
        .log10()
}

/// Drop the first `transient` samples (filter warm-up)
pub fn steady_state(signal: &[f64], transient: usize) -> &[f64] {
    &signal[transient.min(signal.len())..]
}

/// Residual power of `actual` relative to `reference`, sample by sample
pub fn error_power(actual: &[f64], reference: &[f64]) -> f64 {
    let n = actual.len().min(reference.len());
    if n == 0 {
        return 0.0;
    }
    actual
        .iter()
        .zip(reference.iter())
        .map(|(a, r)| (a - r).powi(2))
        .sum::<f64>()
        / n as f64
}
