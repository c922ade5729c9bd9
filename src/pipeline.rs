//! Generate → analyze → design → filter → add noise → filter again.
//!
//! Every stage is a pure function; the pipeline only threads the values
//! through and summarizes the result. Independent runs (different seeds)
//! can be fanned out over threads with [`run_batch`].

use std::thread;

use crossbeam_channel::{bounded, unbounded};
use rand::Rng;
use serde::Serialize;

use crate::buffer::{FilteredBuffer, SampleBuffer};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::filter::{FilterTaps, apply, design_lowpass_fir_with_window};
use crate::metrics::{error_power, ratio_db, signal_power, steady_state};
use crate::source::{generate_gaussian_noise, generate_gaussian_noise_with_rng, generate_sine};
use crate::spectrum::{FrequencySpectrum, transform};

/// Everything a run produces, ready for a presentation layer
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub original: SampleBuffer,
    pub spectrum: FrequencySpectrum,
    pub taps: FilterTaps,
    pub filtered: FilteredBuffer,
    pub noise: SampleBuffer,
    pub noisy: SampleBuffer,
    pub filtered_noisy: FilteredBuffer,
    /// Seed the noise was drawn with, if any
    pub seed: Option<u64>,
}

/// Scalar summary of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub seed: Option<u64>,
    pub num_samples: usize,
    pub sample_rate: f64,
    pub peak_frequency_hz: f64,
    pub peak_magnitude: f64,
    pub num_taps: usize,
    pub dc_gain: f64,
    pub group_delay_samples: usize,
    /// Samples skipped at the start of each steady-state measurement
    pub transient_samples: usize,
    /// Filtered vs original signal power
    pub passband_gain_db: f64,
    /// Signal-to-noise ratio of the noisy input
    pub input_snr_db: f64,
    /// Signal-to-noise ratio after filtering
    pub output_snr_db: f64,
    /// Input noise power over the noise power left after filtering
    pub noise_attenuation_db: f64,
}

impl PipelineOutput {
    /// Length of the filter warm-up, M - 1 samples
    pub fn transient_samples(&self) -> usize {
        self.taps.num_taps() - 1
    }

    /// Noise left in the filtered noisy signal (filtering is linear)
    pub fn residual_noise(&self) -> Vec<f64> {
        self.filtered_noisy
            .samples()
            .iter()
            .zip(self.filtered.samples())
            .map(|(noisy, clean)| noisy - clean)
            .collect()
    }

    pub fn report(&self) -> RunReport {
        let transient = self.transient_samples();
        let original = steady_state(self.original.samples(), transient);
        let filtered = steady_state(self.filtered.samples(), transient);
        let noise = steady_state(self.noise.samples(), transient);
        let filtered_noisy = steady_state(self.filtered_noisy.samples(), transient);

        let signal_power_in = signal_power(original);
        let signal_power_out = signal_power(filtered);
        let noise_power_in = signal_power(noise);
        let noise_power_out = error_power(filtered_noisy, filtered);

        let (peak_frequency_hz, peak_magnitude) = self
            .spectrum
            .peak()
            .map_or((0.0, 0.0), |bin| (bin.frequency, bin.magnitude));

        RunReport {
            seed: self.seed,
            num_samples: self.original.len(),
            sample_rate: self.original.sample_rate(),
            peak_frequency_hz,
            peak_magnitude,
            num_taps: self.taps.num_taps(),
            dc_gain: self.taps.dc_gain(),
            group_delay_samples: self.taps.group_delay_samples(),
            transient_samples: transient,
            passband_gain_db: ratio_db(signal_power_out, signal_power_in),
            input_snr_db: ratio_db(signal_power_in, noise_power_in),
            output_snr_db: ratio_db(signal_power_out, noise_power_out),
            noise_attenuation_db: ratio_db(noise_power_in, noise_power_out),
        }
    }
}

/// Run the full pipeline, drawing noise from `config.noise.seed`
pub fn run(config: &PipelineConfig) -> Result<PipelineOutput> {
    config.validate()?;
    let seed = config.noise.seed;
    run_stages(config, seed, |len, fs| {
        generate_gaussian_noise(len, config.noise.mean, config.noise.stddev, seed, fs)
    })
}

/// Run the full pipeline with an injected noise generator
///
/// `config.noise.seed` is ignored; the caller owns the randomness.
pub fn run_with_rng<R: Rng + ?Sized>(
    config: &PipelineConfig,
    rng: &mut R,
) -> Result<PipelineOutput> {
    config.validate()?;
    run_stages(config, None, |len, fs| {
        generate_gaussian_noise_with_rng(len, config.noise.mean, config.noise.stddev, rng, fs)
    })
}

fn run_stages<F>(
    config: &PipelineConfig,
    seed: Option<u64>,
    make_noise: F,
) -> Result<PipelineOutput>
where
    F: FnOnce(usize, f64) -> Result<SampleBuffer>,
{
    let signal = &config.signal;
    let original = generate_sine(
        signal.sample_rate,
        signal.duration_secs,
        signal.frequency_hz,
    )?;
    log::debug!(
        "Generated {} samples of {} Hz at {} Hz",
        original.len(),
        signal.frequency_hz,
        signal.sample_rate
    );

    let spectrum = transform(&original)?;
    if let Some(peak) = spectrum.peak() {
        log::debug!(
            "Spectrum peak at bin {} ({:.3} Hz), magnitude {:.3}",
            peak.index,
            peak.frequency,
            peak.magnitude
        );
    }

    let filter = &config.filter;
    let taps = design_lowpass_fir_with_window(
        filter.num_taps,
        filter.cutoff_hz,
        signal.sample_rate,
        filter.window,
    )?;

    let filtered = apply(&taps, &original)?;

    let noise = make_noise(original.len(), original.sample_rate())?;
    let noisy = original.add(&noise)?;
    let filtered_noisy = apply(&taps, &noisy)?;
    log::debug!(
        "Filtered clean and noisy signals ({} taps, group delay {} samples)",
        taps.num_taps(),
        taps.group_delay_samples()
    );

    Ok(PipelineOutput {
        original,
        spectrum,
        taps,
        filtered,
        noise,
        noisy,
        filtered_noisy,
        seed,
    })
}

/// Run one seeded pipeline per entry of `seeds` in parallel
///
/// Each run owns its generator, so the result for a given seed does not
/// depend on scheduling. Results come back in the order of `seeds`.
pub fn run_batch(config: &PipelineConfig, seeds: &[u64]) -> Vec<Result<RunReport>> {
    if seeds.is_empty() {
        return Vec::new();
    }

    let workers = thread::available_parallelism()
        .map_or(1, |n| n.get())
        .min(seeds.len());
    log::debug!("Running {} trials on {} workers", seeds.len(), workers);

    let (job_tx, job_rx) = bounded::<(usize, u64)>(seeds.len());
    let (result_tx, result_rx) = unbounded::<(usize, Result<RunReport>)>();

    for job in seeds.iter().copied().enumerate() {
        // Capacity equals the job count and job_rx is still held here
        if job_tx.send(job).is_err() {
            break;
        }
    }
    drop(job_tx);

    thread::scope(|scope| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                for (index, seed) in job_rx.iter() {
                    let mut trial = config.clone();
                    trial.noise.seed = Some(seed);
                    let report = run(&trial).map(|output| output.report());
                    log::trace!("Trial {} (seed {}) finished", index, seed);
                    if result_tx.send((index, report)).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(result_tx);

    let mut results: Vec<(usize, Result<RunReport>)> = result_rx.iter().collect();
    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, report)| report).collect()
}
