use std::f64::consts::PI;

use sinclab::{PipelineConfig, SampleBuffer};

/// Default scenario (1 kHz, 1 s, 5 Hz, 101 taps at 10 Hz) with seeded noise
pub fn reference_config(seed: u64) -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.noise.seed = Some(seed);
    config
}

/// Unit sine whose frequency falls exactly on DFT bin `bin` of an N-point buffer
pub fn bin_aligned_sine(n: usize, sample_rate: f64, bin: usize) -> SampleBuffer {
    let samples = (0..n)
        .map(|i| (2.0 * PI * bin as f64 * i as f64 / n as f64).sin())
        .collect();
    SampleBuffer::new(samples, sample_rate).unwrap()
}

/// Sum of two sines with the given frequencies and amplitudes
pub fn two_tone(
    n: usize,
    sample_rate: f64,
    (f1, a1): (f64, f64),
    (f2, a2): (f64, f64),
) -> SampleBuffer {
    let samples = (0..n)
        .map(|i| {
            let t = i as f64 / sample_rate;
            a1 * (2.0 * PI * f1 * t).sin() + a2 * (2.0 * PI * f2 * t).sin()
        })
        .collect();
    SampleBuffer::new(samples, sample_rate).unwrap()
}
