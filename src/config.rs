//! Configuration for a pipeline run.
//!
//! Every section has defaults matching the reference scenario: a 5 Hz sine
//! sampled at 1 kHz for one second, a 101-tap Hamming low-pass at 10 Hz,
//! and N(0, 0.5²) noise. A TOML file only needs the keys it changes:
//!
//! ```
//! use sinclab::config::PipelineConfig;
//!
//! let config = PipelineConfig::from_toml_str(
//!     r#"
//!     [filter]
//!     num_taps = 63
//!
//!     [noise]
//!     seed = 42
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.filter.num_taps, 63);
//! assert_eq!(config.signal.sample_rate, 1000.0);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CUTOFF_HZ, DEFAULT_DURATION_SECS, DEFAULT_NOISE_STDDEV, DEFAULT_NUM_TAPS,
    DEFAULT_SAMPLE_RATE, DEFAULT_SIGNAL_HZ, MAX_SAMPLES,
};
use crate::error::{DspError, Result, Stage};
use crate::filter::WindowType;

/// Frequency specification
///
/// Can be given as a frequency or as a period, which is handy when the
/// period is the round number.
///
/// # Parsing formats
/// - `5` or `5hz` / `5Hz` - frequency in Hz
/// - `2.5khz` / `2.5kHz` - frequency in kHz
/// - `200ms` - period in milliseconds
/// - `624us` or `624μs` - period in microseconds
///
/// # Example
/// ```
/// use sinclab::config::Frequency;
///
/// let freq: Frequency = "200ms".parse().unwrap();
/// assert!((freq.as_hz() - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frequency(f64);

impl Frequency {
    pub fn from_hz(hz: f64) -> Self {
        Self(hz)
    }

    pub fn from_period_secs(secs: f64) -> Self {
        Self(1.0 / secs)
    }

    pub fn as_hz(&self) -> f64 {
        self.0
    }

    pub fn period_secs(&self) -> f64 {
        1.0 / self.0
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hz", self.0)
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let lower = s.to_lowercase();

        let parse = |num: &str, what: &str| -> std::result::Result<f64, String> {
            let value: f64 = num
                .trim()
                .parse()
                .map_err(|_| format!("invalid {}: {}", what, s))?;
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be non-negative: {}", what, s));
            }
            Ok(value)
        };

        // Period suffixes
        for (suffix, scale) in [("ms", 1e-3), ("us", 1e-6), ("μs", 1e-6)] {
            if let Some(num) = lower.strip_suffix(suffix) {
                let period = parse(num, "period")?;
                if period == 0.0 {
                    return Err("period must be positive".to_string());
                }
                return Ok(Self::from_period_secs(period * scale));
            }
        }

        if let Some(num) = lower.strip_suffix("khz") {
            return Ok(Self::from_hz(parse(num, "frequency")? * 1e3));
        }

        let num = lower.strip_suffix("hz").unwrap_or(&lower);
        Ok(Self::from_hz(parse(num, "frequency")?))
    }
}

/// Complete configuration of one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Test tone synthesis
    pub signal: SignalConfig,
    /// Low-pass filter design
    pub filter: FilterConfig,
    /// Additive Gaussian noise
    pub noise: NoiseConfig,
}

/// Test tone configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Sample rate in Hz
    pub sample_rate: f64,
    /// Signal length in seconds
    pub duration_secs: f64,
    /// Sine frequency in Hz
    pub frequency_hz: f64,
}

/// Low-pass filter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Number of taps (must be odd)
    pub num_taps: usize,
    /// Cutoff frequency in Hz, below Nyquist
    pub cutoff_hz: f64,
    /// Window applied to the sinc response
    pub window: WindowType,
}

/// Additive noise configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub mean: f64,
    /// Standard deviation (0 disables the noise without changing the flow)
    pub stddev: f64,
    /// Seed for reproducible noise; None draws a fresh OS seed per run
    pub seed: Option<u64>,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            duration_secs: DEFAULT_DURATION_SECS,
            frequency_hz: DEFAULT_SIGNAL_HZ,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            num_taps: DEFAULT_NUM_TAPS,
            cutoff_hz: DEFAULT_CUTOFF_HZ,
            window: WindowType::Hamming,
        }
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            mean: 0.0,
            stddev: DEFAULT_NOISE_STDDEV,
            seed: None,
        }
    }
}

impl PipelineConfig {
    /// Parse a (possibly partial) TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| DspError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| DspError::Config(e.to_string()))
    }

    /// Check every boundary parameter before any stage runs
    pub fn validate(&self) -> Result<()> {
        let fail = |parameter: &'static str, reason: String| -> Result<()> {
            Err(DspError::parameter(Stage::Pipeline, parameter, reason))
        };

        let fs = self.signal.sample_rate;
        if !fs.is_finite() || fs <= 0.0 {
            return fail("sample_rate", format!("must be positive, got {}", fs));
        }
        let duration = self.signal.duration_secs;
        if !duration.is_finite() || duration <= 0.0 {
            return fail("duration", format!("must be positive, got {}", duration));
        }
        let count = (fs * duration).round();
        if count > MAX_SAMPLES as f64 {
            return fail(
                "duration",
                format!("{} samples exceeds the limit of {}", count, MAX_SAMPLES),
            );
        }
        let freq = self.signal.frequency_hz;
        if !freq.is_finite() || freq < 0.0 {
            return fail("frequency", format!("must be non-negative, got {}", freq));
        }
        let taps = self.filter.num_taps;
        if taps == 0 || taps.is_multiple_of(2) {
            return fail("numtaps", format!("must be odd and positive, got {}", taps));
        }
        let cutoff = self.filter.cutoff_hz;
        if !cutoff.is_finite() || cutoff <= 0.0 || cutoff >= fs / 2.0 {
            return fail(
                "cutoff",
                format!("must be in (0, {}) Hz, got {}", fs / 2.0, cutoff),
            );
        }
        if !self.noise.mean.is_finite() {
            return fail("mean", format!("must be finite, got {}", self.noise.mean));
        }
        let stddev = self.noise.stddev;
        if !stddev.is_finite() || stddev < 0.0 {
            return fail("stddev", format!("must be non-negative, got {}", stddev));
        }
        Ok(())
    }

    /// Number of samples the signal section produces, capped at [`MAX_SAMPLES`]
    pub fn num_samples(&self) -> usize {
        let count = (self.signal.sample_rate * self.signal.duration_secs).round();
        count.clamp(0.0, MAX_SAMPLES as f64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_from_hz() {
        let freq: Frequency = "5".parse().unwrap();
        assert_eq!(freq.as_hz(), 5.0);
        let freq: Frequency = "10Hz".parse().unwrap();
        assert_eq!(freq.as_hz(), 10.0);
        let freq: Frequency = "10hz".parse().unwrap();
        assert_eq!(freq.as_hz(), 10.0);
    }

    #[test]
    fn test_frequency_from_khz() {
        let freq: Frequency = "2.5kHz".parse().unwrap();
        assert_eq!(freq.as_hz(), 2500.0);
    }

    #[test]
    fn test_frequency_from_period() {
        let freq: Frequency = "200ms".parse().unwrap();
        assert!((freq.as_hz() - 5.0).abs() < 1e-12);

        // 624 μs = 1602.5641025641... Hz
        let freq: Frequency = "624us".parse().unwrap();
        assert!((freq.as_hz() - 1602.5641).abs() < 0.001);
        let freq: Frequency = "624μs".parse().unwrap();
        assert!((freq.as_hz() - 1602.5641).abs() < 0.001);
    }

    #[test]
    fn test_frequency_zero_hz_allowed() {
        let freq: Frequency = "0".parse().unwrap();
        assert_eq!(freq.as_hz(), 0.0);
    }

    #[test]
    fn test_frequency_invalid() {
        assert!("abc".parse::<Frequency>().is_err());
        assert!("-100hz".parse::<Frequency>().is_err());
        assert!("0ms".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_defaults_match_reference_scenario() {
        let config = PipelineConfig::default();
        assert_eq!(config.signal.sample_rate, 1000.0);
        assert_eq!(config.signal.duration_secs, 1.0);
        assert_eq!(config.signal.frequency_hz, 5.0);
        assert_eq!(config.filter.num_taps, 101);
        assert_eq!(config.filter.cutoff_hz, 10.0);
        assert_eq!(config.filter.window, WindowType::Hamming);
        assert_eq!(config.noise.stddev, 0.5);
        assert_eq!(config.noise.seed, None);
        assert_eq!(config.num_samples(), 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PipelineConfig::from_toml_str(
            r#"
            [signal]
            frequency_hz = 7.5

            [filter]
            window = "blackman"
            "#,
        )
        .unwrap();
        assert_eq!(config.signal.frequency_hz, 7.5);
        assert_eq!(config.signal.sample_rate, 1000.0);
        assert_eq!(config.filter.window, WindowType::Blackman);
        assert_eq!(config.filter.num_taps, 101);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = PipelineConfig::default();
        config.noise.seed = Some(7);
        let text = config.to_toml_string().unwrap();
        assert_eq!(PipelineConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        assert!(matches!(
            PipelineConfig::from_toml_str("[filter]\nnum_taps = \"many\""),
            Err(DspError::Config(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = PipelineConfig::default();
        config.filter.num_taps = 100;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.filter.cutoff_hz = 500.0;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.signal.duration_secs = 0.0;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.noise.stddev = -0.1;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.signal.sample_rate = 1e20;
        config.filter.cutoff_hz = 10.0;
        assert!(matches!(
            config.validate(),
            Err(DspError::InvalidParameter {
                parameter: "duration",
                ..
            })
        ));
        assert_eq!(config.num_samples(), MAX_SAMPLES);
    }
}
