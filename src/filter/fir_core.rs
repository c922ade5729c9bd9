use super::Filter;
use super::design::FilterTaps;

/// Streaming FIR filter with a circular delay line
///
/// Produces the same samples as [`apply`](super::apply) for the same taps,
/// one input at a time. History starts at zero.
pub struct FirFilterCore {
    taps: Vec<f64>,
    delay_line: Vec<f64>,
    pos: usize,
}

/// Σ taps[k]·x[n-k] with `history` yielding x[n], x[n-1], ...
///
/// Accumulates left to right in increasing k and stops at the shorter of
/// the two sequences. Shared by batch and streaming filtering so both give
/// bit-identical output.
pub(crate) fn dot_newest_first<'a, I>(taps: &[f64], history: I) -> f64
where
    I: IntoIterator<Item = &'a f64>,
{
    taps.iter()
        .zip(history)
        .fold(0.0f64, |acc, (h, x)| acc + h * x)
}

impl FirFilterCore {
    /// Create a new FIR filter core with the given tap coefficients
    pub fn new(taps: &FilterTaps) -> Self {
        Self {
            delay_line: vec![0.0; taps.num_taps()],
            taps: taps.coefficients().to_vec(),
            pos: 0,
        }
    }

    /// Get the number of taps (filter length)
    pub fn num_taps(&self) -> usize {
        self.taps.len()
    }

    /// Get the group delay in samples (half the filter length for linear phase)
    pub fn group_delay_samples(&self) -> usize {
        (self.taps.len() - 1) / 2
    }
}

impl Filter for FirFilterCore {
    fn process(&mut self, sample: f64) -> f64 {
        self.delay_line[self.pos] = sample;

        // Ring order: [0..=pos] ends at the newest sample, (pos..] holds the oldest
        let (recent, older) = self.delay_line.split_at(self.pos + 1);
        let history = recent.iter().rev().chain(older.iter().rev());
        let output = dot_newest_first(&self.taps, history);

        self.pos += 1;
        if self.pos == self.taps.len() {
            self.pos = 0;
        }
        output
    }

    fn reset(&mut self) {
        self.delay_line.fill(0.0);
        self.pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::design_lowpass_fir;

    #[test]
    fn test_impulse_response_is_taps() {
        let taps = design_lowpass_fir(31, 50.0, 1000.0).unwrap();
        let mut core = FirFilterCore::new(&taps);

        let mut samples = vec![0.0; 40];
        samples[0] = 1.0;
        core.process_buffer(&mut samples);

        assert_eq!(&samples[..31], taps.coefficients());
        assert!(samples[31..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_dot_newest_first_stops_at_shorter() {
        let taps = [0.5, 0.25, 0.125];
        assert_eq!(dot_newest_first(&taps, &[2.0]), 1.0);
        assert_eq!(dot_newest_first(&taps, &[2.0, 4.0, 8.0, 16.0]), 3.0);
        assert_eq!(dot_newest_first(&taps, std::iter::empty()), 0.0);
    }

    #[test]
    fn test_warm_up_matches_truncated_sum() {
        let taps = FilterTaps::from_coefficients(vec![0.1, 0.2, 0.4, 0.2, 0.1], 100.0).unwrap();
        let input = [3.0, -1.0, 2.0, 0.5, -4.0, 1.5, 2.5];
        let mut core = FirFilterCore::new(&taps);
        for (n, &x) in input.iter().enumerate() {
            let expected = dot_newest_first(taps.coefficients(), input[..=n].iter().rev());
            assert_eq!(core.process(x), expected, "sample {}", n);
        }
    }

    #[test]
    fn test_group_delay() {
        let taps = design_lowpass_fir(63, 50.0, 1000.0).unwrap();
        let core = FirFilterCore::new(&taps);
        assert_eq!(core.num_taps(), 63);
        assert_eq!(core.group_delay_samples(), 31);
    }

    #[test]
    fn test_reset_clears_history() {
        let taps = FilterTaps::from_coefficients(vec![0.25, 0.5, 0.25], 100.0).unwrap();
        let mut core = FirFilterCore::new(&taps);
        core.process(1.0);
        core.process(1.0);
        core.reset();
        assert_eq!(core.process(1.0), 0.25);
    }

    #[test]
    fn test_chunked_processing_matches_single_pass() {
        let taps = design_lowpass_fir(21, 30.0, 1000.0).unwrap();
        let input: Vec<f64> = (0..500).map(|i| ((i * 37 % 101) as f64 / 50.0) - 1.0).collect();

        let mut whole = input.clone();
        FirFilterCore::new(&taps).process_buffer(&mut whole);

        let mut core = FirFilterCore::new(&taps);
        let mut chunked = input.clone();
        for chunk in chunked.chunks_mut(64) {
            core.process_buffer(chunk);
        }

        assert_eq!(whole, chunked);
    }
}
