mod test_signals;

use approx::assert_abs_diff_eq;
use sinclab::metrics::{ratio_db, signal_power, steady_state};
use sinclab::pipeline::{run, run_batch};
use sinclab::{DspError, PipelineConfig, Stage};
use std::f64::consts::PI;
use test_signals::generate::reference_config;

#[test]
fn test_reference_scenario() {
    let output = run(&reference_config(42)).unwrap();

    assert_eq!(output.original.len(), 1000);
    assert_eq!(output.original.sample_rate(), 1000.0);

    let peak = output.spectrum.peak().unwrap();
    assert_eq!(peak.index, 5);
    assert_abs_diff_eq!(peak.frequency, 5.0, epsilon = 1e-12);

    let taps = &output.taps;
    assert_eq!(taps.num_taps(), 101);
    assert_abs_diff_eq!(taps.dc_gain(), 1.0, epsilon = 1e-9);
    assert!(taps.is_symmetric());
}

#[test]
fn test_filtered_signal_tracks_delayed_sine() {
    let output = run(&reference_config(1)).unwrap();
    let taps = &output.taps;
    let delay = taps.group_delay_samples();
    let gain = taps.frequency_response(5.0).norm();
    assert!((gain - 0.881).abs() < 0.01, "gain at 5 Hz: {}", gain);

    // Linear phase: after the transient the output is the input scaled by
    // |H(5 Hz)| and delayed by (M-1)/2 samples
    let filtered = output.filtered.samples();
    for n in (taps.num_taps() - 1)..filtered.len() {
        let expected = gain * (2.0 * PI * 5.0 * (n - delay) as f64 / 1000.0).sin();
        assert_abs_diff_eq!(filtered[n], expected, epsilon = 1e-9);
    }
}

#[test]
fn test_noise_attenuated_by_at_least_10_db() {
    for seed in 0..8 {
        let output = run(&reference_config(seed)).unwrap();
        let transient = output.transient_samples();
        let residual = output.residual_noise();
        let noise_in = signal_power(steady_state(output.noise.samples(), transient));
        let noise_out = signal_power(steady_state(&residual, transient));
        let attenuation = ratio_db(noise_in, noise_out);
        assert!(attenuation >= 10.0, "seed {}: {} dB", seed, attenuation);
        assert_abs_diff_eq!(
            attenuation,
            output.report().noise_attenuation_db,
            epsilon = 1e-9
        );
    }
}

#[test]
fn test_all_buffers_share_length_and_rate() {
    let mut config = reference_config(3);
    config.signal.sample_rate = 2000.0;
    config.signal.duration_secs = 0.75;
    let output = run(&config).unwrap();
    for buffer in [
        &output.original,
        &output.filtered,
        &output.noise,
        &output.noisy,
        &output.filtered_noisy,
    ] {
        assert_eq!(buffer.len(), 1500);
        assert_eq!(buffer.sample_rate(), 2000.0);
    }
    assert_eq!(output.spectrum.len(), 1500);
}

#[test]
fn test_seeded_runs_are_bit_identical() {
    let a = run(&reference_config(99)).unwrap();
    let b = run(&reference_config(99)).unwrap();
    assert_eq!(a.noise, b.noise);
    assert_eq!(a.filtered_noisy, b.filtered_noisy);
    assert_eq!(a.taps, b.taps);
    assert_eq!(a.spectrum, b.spectrum);
}

#[test]
fn test_unseeded_runs_differ() {
    let config = PipelineConfig::default();
    let a = run(&config).unwrap();
    let b = run(&config).unwrap();
    assert_eq!(a.original, b.original);
    assert_ne!(a.noise, b.noise);
}

#[test]
fn test_short_signal_still_filters() {
    // Fewer samples than taps: everything is transient, but lengths hold
    let mut config = reference_config(5);
    config.signal.duration_secs = 0.05;
    let output = run(&config).unwrap();
    assert_eq!(output.original.len(), 50);
    assert_eq!(output.filtered.len(), 50);
    assert_eq!(output.filtered_noisy.len(), 50);
}

#[test]
fn test_duration_rounding_to_zero_fails() {
    let mut config = PipelineConfig::default();
    config.signal.duration_secs = 0.0001;
    match run(&config) {
        Err(DspError::InvalidParameter {
            stage, parameter, ..
        }) => {
            assert_eq!(stage, Stage::SignalSource);
            assert_eq!(parameter, "duration");
        }
        other => panic!("expected duration error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_even_taps_rejected_up_front() {
    let mut config = PipelineConfig::default();
    config.filter.num_taps = 64;
    assert!(matches!(
        run(&config),
        Err(DspError::InvalidParameter {
            parameter: "numtaps",
            ..
        })
    ));
}

#[test]
fn test_batch_is_ordered_and_reproducible() {
    let config = PipelineConfig::default();
    let seeds: Vec<u64> = (100..116).collect();
    let first = run_batch(&config, &seeds);
    let second = run_batch(&config, &seeds);
    assert_eq!(first.len(), seeds.len());
    for ((seed, a), b) in seeds.iter().zip(first).zip(second) {
        let a = a.unwrap();
        assert_eq!(a.seed, Some(*seed));
        assert_eq!(a, b.unwrap());
    }
}

#[test]
fn test_config_from_toml_drives_run() {
    let config = PipelineConfig::from_toml_str(
        r#"
        [signal]
        sample_rate = 8000.0
        duration_secs = 0.5
        frequency_hz = 250.0

        [filter]
        num_taps = 63
        cutoff_hz = 500.0
        window = "hann"

        [noise]
        stddev = 0.1
        seed = 7
        "#,
    )
    .unwrap();
    let report = run(&config).unwrap().report();
    assert_eq!(report.num_samples, 4000);
    assert_eq!(report.num_taps, 63);
    assert_abs_diff_eq!(report.peak_frequency_hz, 250.0, epsilon = 1e-9);
    assert_eq!(report.seed, Some(7));
}
