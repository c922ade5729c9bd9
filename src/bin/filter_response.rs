use anyhow::{Context, Result};
use clap::Parser;

use sinclab::config::Frequency;
use sinclab::filter::{
    Filter, FilterTaps, FirFilterCore, WindowType, design_lowpass_fir_with_window,
};
use sinclab::metrics::{ratio_db, signal_power, steady_state};
use sinclab::source::generate_sine;

#[derive(Parser, Debug)]
#[command(name = "filter_response")]
#[command(about = "Print the magnitude response of a windowed-sinc low-pass filter")]
struct Args {
    /// Sample rate
    #[arg(long, default_value = "1000")]
    sample_rate: Frequency,

    /// Cutoff frequency
    #[arg(long, default_value = "10")]
    cutoff: Frequency,

    /// Number of taps (odd)
    #[arg(short, long, default_value_t = 101)]
    num_taps: usize,

    /// Window applied to the sinc response
    #[arg(short, long, value_enum, default_value = "hamming")]
    window: WindowType,

    /// Probe frequencies in Hz, comma-separated (default: spread around the cutoff)
    #[arg(short, long, value_delimiter = ',')]
    probes: Vec<f64>,

    /// Minimum passband gain in dB
    #[arg(long, default_value_t = -3.0, allow_negative_numbers = true)]
    passband_db: f64,

    /// Maximum stopband gain in dB
    #[arg(long, default_value_t = -20.0, allow_negative_numbers = true)]
    stopband_db: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let sample_rate = args.sample_rate.as_hz();
    let cutoff = args.cutoff.as_hz();
    let taps = design_lowpass_fir_with_window(args.num_taps, cutoff, sample_rate, args.window)
        .context("Failed to design filter")?;

    let probes = if args.probes.is_empty() {
        default_probes(cutoff, sample_rate)
    } else {
        args.probes.clone()
    };

    println!("=== Filter Frequency Response ===\n");
    println!(
        "{} window, {} taps, cutoff {} Hz at {} Hz (group delay {} samples)\n",
        args.window,
        taps.num_taps(),
        cutoff,
        sample_rate,
        taps.group_delay_samples()
    );
    println!(
        "{:<10} {:<15} {:<15} {:<15}",
        "Freq (Hz)", "Response (dB)", "Measured (dB)", "Status"
    );
    println!("{}", "-".repeat(60));

    let mut failures = 0;
    for freq in probes {
        let analytic = taps.magnitude_db(freq);
        let measured = measure_gain_db(&taps, freq)?;
        let status = classify(freq, cutoff, analytic, args.passband_db, args.stopband_db);
        if status.starts_with("FAIL") {
            failures += 1;
        }
        println!("{:<10.1} {:<15.2} {:<15.2} {:<15}", freq, analytic, measured, status);
    }

    println!();
    if failures > 0 {
        anyhow::bail!("{} probe(s) outside the expected response", failures);
    }
    println!("Filter response OK.");
    Ok(())
}

/// Probes below, at and above the cutoff, clipped to below Nyquist
fn default_probes(cutoff: f64, sample_rate: f64) -> Vec<f64> {
    let nyquist = sample_rate / 2.0;
    [0.0, 0.2, 0.5, 0.8, 1.0, 2.0, 5.0, 10.0, 20.0]
        .iter()
        .map(|m| m * cutoff)
        .filter(|&f| f < nyquist)
        .collect()
}

/// Below 0.5·fc must pass, above 5·fc must be attenuated, in between is transition
fn classify(
    freq: f64,
    cutoff: f64,
    gain_db: f64,
    passband_db: f64,
    stopband_db: f64,
) -> &'static str {
    if freq <= 0.5 * cutoff {
        if gain_db > passband_db {
            "PASS"
        } else {
            "FAIL (too attenuated)"
        }
    } else if freq >= 5.0 * cutoff {
        if gain_db < stopband_db {
            "PASS"
        } else {
            "FAIL (not attenuated)"
        }
    } else {
        "transition"
    }
}

/// Run a probe sine through the streaming filter and compare steady-state power
fn measure_gain_db(taps: &FilterTaps, freq: f64) -> Result<f64> {
    if freq == 0.0 {
        // sin(0) is all zeros; the DC response is the tap sum
        return Ok(20.0 * taps.dc_gain().abs().log10());
    }
    let fs = taps.sample_rate();
    let settle = taps.num_taps() - 1;
    let period = (fs / freq).max(fs / 10.0);
    let duration = (settle as f64 + period) * 4.0 / fs;
    let input = generate_sine(fs, duration, freq)?;

    let mut output = input.samples().to_vec();
    let mut filter = FirFilterCore::new(taps);
    filter.process_buffer(&mut output);

    let input = steady_state(input.samples(), settle);
    let output = steady_state(&output, settle);
    Ok(ratio_db(signal_power(output), signal_power(input)))
}
