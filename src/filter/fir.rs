use num_complex::Complex;

use super::design::FilterTaps;
use super::fir_core::dot_newest_first;
use crate::buffer::{FilteredBuffer, SampleBuffer};
use crate::error::{DspError, Result, Stage};
use crate::spectrum::fft::fft_radix2;

/// Filter a buffer by direct-form causal convolution
///
/// y[n] = Σ_{k=0}^{min(n, M-1)} taps[k]·x[n-k], with zero history before
/// the first sample. The sum for each output runs in increasing k, so
/// identical taps and input always give bit-identical output. O(N·M).
///
/// # Errors
/// `InvalidParameter` if the taps were designed for a different sample
/// rate than the input.
pub fn apply(taps: &FilterTaps, input: &SampleBuffer) -> Result<FilteredBuffer> {
    check_rates(taps, input)?;

    let h = taps.coefficients();
    let x = input.samples();
    let output = (0..x.len())
        .map(|n| dot_newest_first(h, x[..=n].iter().rev()))
        .collect();

    Ok(SampleBuffer::from_parts(output, input.sample_rate()))
}

/// Filter a buffer by FFT convolution
///
/// Same result as [`apply`] within floating-point tolerance, in
/// O((N+M) log(N+M)). Worth it for long tap sets; summation order differs
/// from [`apply`], so outputs are not bit-identical to it.
pub fn apply_fft(taps: &FilterTaps, input: &SampleBuffer) -> Result<FilteredBuffer> {
    check_rates(taps, input)?;

    let h = taps.coefficients();
    let x = input.samples();
    let len = (x.len() + h.len() - 1).next_power_of_two();

    let mut xs = vec![Complex::new(0.0, 0.0); len];
    for (slot, &v) in xs.iter_mut().zip(x.iter()) {
        *slot = Complex::new(v, 0.0);
    }
    let mut hs = vec![Complex::new(0.0, 0.0); len];
    for (slot, &v) in hs.iter_mut().zip(h.iter()) {
        *slot = Complex::new(v, 0.0);
    }

    fft_radix2(&mut xs, false);
    fft_radix2(&mut hs, false);
    for (a, b) in xs.iter_mut().zip(hs.iter()) {
        *a *= *b;
    }
    fft_radix2(&mut xs, true);

    let scale = 1.0 / len as f64;
    let output = xs[..x.len()].iter().map(|c| c.re * scale).collect();

    Ok(SampleBuffer::from_parts(output, input.sample_rate()))
}

fn check_rates(taps: &FilterTaps, input: &SampleBuffer) -> Result<()> {
    if taps.sample_rate() != input.sample_rate() {
        return Err(DspError::parameter(
            Stage::FirFilter,
            "sample_rate",
            format!(
                "taps designed for {} Hz cannot filter a {} Hz buffer",
                taps.sample_rate(),
                input.sample_rate()
            ),
        ));
    }
    Ok(())
}
