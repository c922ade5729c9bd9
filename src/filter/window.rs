//! Tapering windows for windowed-sinc design

use std::f64::consts::PI;

use crate::constants::{HAMMING_A, HAMMING_B};

/// Window applied to the ideal sinc response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    /// 0.54 - 0.46·cos(2πn/(M-1)), about 53 dB sidelobe rejection
    #[default]
    Hamming,
    /// 0.5 - 0.5·cos(2πn/(M-1)), about 44 dB
    Hann,
    /// 0.42 - 0.5·cos(2πn/(M-1)) + 0.08·cos(4πn/(M-1)), about 74 dB
    Blackman,
    /// No tapering, about 21 dB
    Rectangular,
}

impl WindowType {
    fn value(self, n: usize, len: usize) -> f64 {
        let x = 2.0 * PI * n as f64 / (len - 1) as f64;
        match self {
            WindowType::Hamming => HAMMING_A - HAMMING_B * x.cos(),
            WindowType::Hann => 0.5 - 0.5 * x.cos(),
            WindowType::Blackman => 0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos(),
            WindowType::Rectangular => 1.0,
        }
    }
}

impl std::fmt::Display for WindowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WindowType::Hamming => "hamming",
            WindowType::Hann => "hann",
            WindowType::Blackman => "blackman",
            WindowType::Rectangular => "rectangular",
        };
        f.write_str(name)
    }
}

/// Symmetric window of `len` points
///
/// The second half mirrors the first, so w[n] == w[len-1-n] exactly. A
/// single-point window is [1.0].
pub fn generate_window(window: WindowType, len: usize) -> Vec<f64> {
    if len <= 1 {
        return vec![1.0; len];
    }

    let mut w = vec![0.0; len];
    let center = (len - 1) / 2;
    for n in 0..=center {
        let value = window.value(n, len);
        w[n] = value;
        w[len - 1 - n] = value;
    }
    w
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_hamming_endpoints_and_center() {
        let w = generate_window(WindowType::Hamming, 101);
        assert_abs_diff_eq!(w[0], 0.08, epsilon = 1e-12);
        assert_abs_diff_eq!(w[100], 0.08, epsilon = 1e-12);
        assert_abs_diff_eq!(w[50], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_windows_are_symmetric() {
        for window in [
            WindowType::Hamming,
            WindowType::Hann,
            WindowType::Blackman,
            WindowType::Rectangular,
        ] {
            for len in [2, 3, 8, 51] {
                let w = generate_window(window, len);
                assert_eq!(w.len(), len);
                for n in 0..len {
                    assert_eq!(w[n], w[len - 1 - n], "{} len {} n {}", window, len, n);
                }
            }
        }
    }

    #[test]
    fn test_hann_endpoints_are_zero() {
        let w = generate_window(WindowType::Hann, 9);
        assert_abs_diff_eq!(w[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(w[4], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_lengths() {
        assert!(generate_window(WindowType::Hamming, 0).is_empty());
        assert_eq!(generate_window(WindowType::Blackman, 1), vec![1.0]);
    }
}
