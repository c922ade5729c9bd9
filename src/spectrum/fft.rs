//! Discrete Fourier transform kernels
//!
//! Power-of-two lengths use an iterative radix-2 Cooley-Tukey FFT. Any
//! other length goes through Bluestein's chirp-z algorithm, which rewrites
//! the exact N-point DFT as a circular convolution of power-of-two length
//! M >= 2N - 1 and evaluates it with the radix-2 kernel. Both paths are
//! O(N log N) and neither zero-pads the signal, so bin k always sits at
//! k·fs/N.

use num_complex::Complex;
use std::f64::consts::PI;

/// Algorithm used for a transform of a given length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftAlgorithm {
    /// N <= 1, the transform is the identity
    Trivial,
    /// N is a power of two
    Radix2,
    /// Arbitrary N via chirp-z convolution of the given power-of-two length
    Bluestein { convolution_len: usize },
}

impl FftAlgorithm {
    pub fn for_len(n: usize) -> Self {
        if n <= 1 {
            FftAlgorithm::Trivial
        } else if n.is_power_of_two() {
            FftAlgorithm::Radix2
        } else {
            FftAlgorithm::Bluestein {
                convolution_len: (2 * n - 1).next_power_of_two(),
            }
        }
    }
}

/// Forward DFT of arbitrary length, X[k] = Σ x[n]·e^{-2πi·kn/N}
pub fn dft(input: &[Complex<f64>]) -> Vec<Complex<f64>> {
    match FftAlgorithm::for_len(input.len()) {
        FftAlgorithm::Trivial => input.to_vec(),
        FftAlgorithm::Radix2 => {
            let mut buffer = input.to_vec();
            fft_radix2(&mut buffer, false);
            buffer
        }
        FftAlgorithm::Bluestein { convolution_len } => bluestein(input, convolution_len),
    }
}

/// Direct O(N²) evaluation of the DFT definition
///
/// Reference implementation for checking the fast paths.
pub fn dft_direct(input: &[Complex<f64>]) -> Vec<Complex<f64>> {
    let n = input.len();
    (0..n)
        .map(|k| {
            let mut acc = Complex::new(0.0, 0.0);
            for (j, &x) in input.iter().enumerate() {
                // Reduce k·j mod N before scaling to keep the angle small
                let angle = -2.0 * PI * ((k * j) % n) as f64 / n as f64;
                acc += x * Complex::from_polar(1.0, angle);
            }
            acc
        })
        .collect()
}

/// In-place iterative radix-2 FFT. `inverse` computes the unscaled inverse.
pub(crate) fn fft_radix2(buffer: &mut [Complex<f64>], inverse: bool) {
    let n = buffer.len();
    debug_assert!(n.is_power_of_two());
    if n <= 1 {
        return;
    }

    // Bit-reversal permutation
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            buffer.swap(i, j);
        }
    }

    let sign = if inverse { 1.0 } else { -1.0 };
    let twiddles: Vec<Complex<f64>> = (0..n / 2)
        .map(|k| Complex::from_polar(1.0, sign * 2.0 * PI * k as f64 / n as f64))
        .collect();

    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let stride = n / len;
        for start in (0..n).step_by(len) {
            for k in 0..half {
                let a = start + k;
                let b = a + half;
                let t = twiddles[k * stride] * buffer[b];
                buffer[b] = buffer[a] - t;
                buffer[a] += t;
            }
        }
        len <<= 1;
    }
}

fn bluestein(input: &[Complex<f64>], m: usize) -> Vec<Complex<f64>> {
    let n = input.len();

    // Chirp w[k] = e^{-iπk²/N}; k² is reduced mod 2N so large k stay accurate
    let chirp: Vec<Complex<f64>> = (0..n)
        .map(|k| {
            let k2 = (k * k) % (2 * n);
            Complex::from_polar(1.0, -PI * k2 as f64 / n as f64)
        })
        .collect();

    let mut a = vec![Complex::new(0.0, 0.0); m];
    for (slot, (&x, &w)) in a.iter_mut().zip(input.iter().zip(chirp.iter())) {
        *slot = x * w;
    }

    let mut b = vec![Complex::new(0.0, 0.0); m];
    b[0] = chirp[0].conj();
    for k in 1..n {
        let w = chirp[k].conj();
        b[k] = w;
        b[m - k] = w;
    }

    fft_radix2(&mut a, false);
    fft_radix2(&mut b, false);
    for (x, y) in a.iter_mut().zip(b.iter()) {
        *x *= *y;
    }
    fft_radix2(&mut a, true);

    let scale = 1.0 / m as f64;
    a.iter()
        .zip(chirp.iter())
        .map(|(&c, &w)| c * scale * w)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn real(values: &[f64]) -> Vec<Complex<f64>> {
        values.iter().map(|&v| Complex::new(v, 0.0)).collect()
    }

    fn assert_close(a: &[Complex<f64>], b: &[Complex<f64>], tol: f64) {
        assert_eq!(a.len(), b.len());
        for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
            assert!(
                (*x - *y).norm() < tol,
                "bin {}: {} vs {} (diff {})",
                i,
                x,
                y,
                (*x - *y).norm()
            );
        }
    }

    fn test_vector(n: usize) -> Vec<Complex<f64>> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                Complex::new((0.3 * t).sin() + 0.1 * t.cos(), 0.05 * (1.7 * t).cos())
            })
            .collect()
    }

    #[test]
    fn test_algorithm_selection() {
        assert_eq!(FftAlgorithm::for_len(1), FftAlgorithm::Trivial);
        assert_eq!(FftAlgorithm::for_len(1024), FftAlgorithm::Radix2);
        assert_eq!(
            FftAlgorithm::for_len(1000),
            FftAlgorithm::Bluestein {
                convolution_len: 2048
            }
        );
        assert_eq!(
            FftAlgorithm::for_len(3),
            FftAlgorithm::Bluestein { convolution_len: 8 }
        );
    }

    #[test]
    fn test_radix2_matches_direct() {
        for n in [2, 4, 8, 64, 256] {
            let input = test_vector(n);
            assert_close(&dft(&input), &dft_direct(&input), 1e-9);
        }
    }

    #[test]
    fn test_bluestein_matches_direct() {
        for n in [3, 5, 6, 7, 12, 100, 101, 1000] {
            let input = test_vector(n);
            assert_close(&dft(&input), &dft_direct(&input), 1e-8);
        }
    }

    #[test]
    fn test_impulse_is_flat() {
        let mut input = real(&[0.0; 12]);
        input[0] = Complex::new(1.0, 0.0);
        for bin in dft(&input) {
            assert!((bin - Complex::new(1.0, 0.0)).norm() < 1e-12);
        }
    }

    #[test]
    fn test_constant_goes_to_dc() {
        let input = real(&[2.0; 10]);
        let out = dft(&input);
        assert!((out[0] - Complex::new(20.0, 0.0)).norm() < 1e-10);
        for bin in &out[1..] {
            assert!(bin.norm() < 1e-10);
        }
    }

    #[test]
    fn test_inverse_round_trip() {
        let input = test_vector(32);
        let mut buffer = input.clone();
        fft_radix2(&mut buffer, false);
        fft_radix2(&mut buffer, true);
        let restored: Vec<Complex<f64>> = buffer.iter().map(|c| *c / 32.0).collect();
        assert_close(&restored, &input, 1e-12);
    }

    #[test]
    fn test_single_sample_is_identity() {
        let input = real(&[-3.5]);
        assert_eq!(dft(&input), input);
    }
}
