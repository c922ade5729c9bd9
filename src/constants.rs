//! Numeric constants shared across the pipeline
//!
//! Tolerances used when validating designs and comparing floating-point
//! results, plus the defaults of the reference scenario.

/// Tolerance for the unity DC gain of a designed low-pass filter.
pub const DC_GAIN_TOLERANCE: f64 = 1e-9;

/// Below this magnitude the sinc argument is treated as zero (sinc(0) = 1).
pub const SINC_EPSILON: f64 = 1e-12;

/// Floor applied before taking a logarithm of a power or magnitude.
pub const MIN_POWER_THRESHOLD: f64 = 1e-20;

/// Upper bound on the samples a single buffer may hold (2 GiB of f64).
pub const MAX_SAMPLES: usize = 1 << 28;

/// Hamming window coefficients: w[n] = A - B·cos(2πn/(M-1)).
pub const HAMMING_A: f64 = 0.54;
pub const HAMMING_B: f64 = 0.46;

/// Reference scenario defaults.
pub const DEFAULT_SAMPLE_RATE: f64 = 1000.0;
pub const DEFAULT_DURATION_SECS: f64 = 1.0;
pub const DEFAULT_SIGNAL_HZ: f64 = 5.0;
pub const DEFAULT_CUTOFF_HZ: f64 = 10.0;
pub const DEFAULT_NUM_TAPS: usize = 101;
pub const DEFAULT_NOISE_STDDEV: f64 = 0.5;
