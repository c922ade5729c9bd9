use anyhow::{Context, Result};
use clap::Parser;
use rolling_stats::Stats;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use sinclab::buffer::SampleBuffer;
use sinclab::config::{Frequency, PipelineConfig};
use sinclab::filter::WindowType;
use sinclab::output::{
    OutputFormat, create_formatter, write_buffer_csv, write_spectrum_csv, write_taps_csv,
};
use sinclab::pipeline::{self, PipelineOutput, RunReport};
use sinclab::save_wav;

#[derive(Parser, Debug)]
#[command(name = "sinclab")]
#[command(about = "Sine, spectrum and windowed-sinc low-pass pipeline", long_about = None)]
struct Args {
    /// TOML configuration file (flags override its values)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sample rate (e.g., "1000", "48khz")
    #[arg(long)]
    sample_rate: Option<Frequency>,

    /// Signal duration in seconds
    #[arg(short, long)]
    duration: Option<f64>,

    /// Sine frequency (e.g., "5", "5hz", "200ms")
    #[arg(long)]
    frequency: Option<Frequency>,

    /// Low-pass cutoff frequency
    #[arg(long)]
    cutoff: Option<Frequency>,

    /// Number of filter taps (odd)
    #[arg(short, long)]
    num_taps: Option<usize>,

    /// Window applied to the sinc response
    #[arg(short, long, value_enum)]
    window: Option<WindowType>,

    /// Mean of the additive noise
    #[arg(long, allow_negative_numbers = true)]
    noise_mean: Option<f64>,

    /// Standard deviation of the additive noise
    #[arg(long)]
    noise_stddev: Option<f64>,

    /// Noise seed for reproducible runs (base seed with --trials)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write every buffer as CSV and WAV into this directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Run this many seeded trials in parallel and summarize them
    #[arg(short, long)]
    trials: Option<usize>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Serialize)]
struct StatsSummary {
    count: usize,
    mean: f64,
    std_dev: f64,
    min: f64,
    max: f64,
}

impl StatsSummary {
    fn from_stats(stats: &Stats<f64>) -> Option<Self> {
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
struct TrialSummary {
    trials: usize,
    failed: usize,
    noise_attenuation_db: Option<StatsSummary>,
    output_snr_db: Option<StatsSummary>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = build_config(&args)?;

    if args.dump_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    config.validate().context("Invalid configuration")?;

    match args.trials {
        Some(trials) => run_trials(&args, &config, trials),
        None => run_single(&args, &config),
    }
}

fn load_config(path: &Path) -> Result<PipelineConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    PipelineConfig::from_toml_str(&content).context("Failed to parse config file")
}

fn build_config(args: &Args) -> Result<PipelineConfig> {
    let mut config = match args.config {
        Some(ref path) => load_config(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(rate) = args.sample_rate {
        config.signal.sample_rate = rate.as_hz();
    }
    if let Some(duration) = args.duration {
        config.signal.duration_secs = duration;
    }
    if let Some(freq) = args.frequency {
        config.signal.frequency_hz = freq.as_hz();
    }
    if let Some(cutoff) = args.cutoff {
        config.filter.cutoff_hz = cutoff.as_hz();
    }
    if let Some(num_taps) = args.num_taps {
        config.filter.num_taps = num_taps;
    }
    if let Some(window) = args.window {
        config.filter.window = window;
    }
    if let Some(mean) = args.noise_mean {
        config.noise.mean = mean;
    }
    if let Some(stddev) = args.noise_stddev {
        config.noise.stddev = stddev;
    }
    if args.seed.is_some() {
        config.noise.seed = args.seed;
    }

    Ok(config)
}

fn run_single(args: &Args, config: &PipelineConfig) -> Result<()> {
    let output = pipeline::run(config).context("Pipeline failed")?;
    let report = output.report();

    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }
    println!("{}", formatter.format(&report));

    if let Some(ref dir) = args.output_dir {
        write_outputs(dir, config, &output)?;
        eprintln!("Buffers written to {}", dir.display());
    }
    Ok(())
}

fn run_trials(args: &Args, config: &PipelineConfig, trials: usize) -> Result<()> {
    if trials == 0 {
        anyhow::bail!("--trials must be at least 1");
    }
    let base_seed = config.noise.seed.unwrap_or(0);
    let seeds: Vec<u64> = (0..trials as u64).map(|i| base_seed.wrapping_add(i)).collect();
    log::info!("Running {} trials from seed {}", trials, base_seed);

    let results = pipeline::run_batch(config, &seeds);

    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }

    let mut reports: Vec<RunReport> = Vec::with_capacity(results.len());
    let mut failed = 0;
    for (seed, result) in seeds.iter().zip(results) {
        match result {
            Ok(report) => {
                println!("{}", formatter.format(&report));
                reports.push(report);
            }
            Err(e) => {
                log::warn!("Trial with seed {} failed: {}", seed, e);
                failed += 1;
            }
        }
    }

    let summary = summarize(&reports, failed);
    match args.format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string(&summary).context("Failed to serialize summary")?
        ),
        _ => print_summary(&summary),
    }
    Ok(())
}

fn summarize(reports: &[RunReport], failed: usize) -> TrialSummary {
    let mut attenuation: Stats<f64> = Stats::new();
    let mut output_snr: Stats<f64> = Stats::new();
    for report in reports {
        attenuation.update(report.noise_attenuation_db);
        output_snr.update(report.output_snr_db);
    }
    TrialSummary {
        trials: reports.len() + failed,
        failed,
        noise_attenuation_db: StatsSummary::from_stats(&attenuation),
        output_snr_db: StatsSummary::from_stats(&output_snr),
    }
}

fn print_summary(summary: &TrialSummary) {
    eprintln!();
    eprintln!("Trials: {} ({} failed)", summary.trials, summary.failed);
    for (name, stats) in [
        ("Noise attenuation", &summary.noise_attenuation_db),
        ("Output SNR", &summary.output_snr_db),
    ] {
        match stats {
            Some(s) => eprintln!(
                "{:<18} {:>6.2} ± {:.2} dB (min {:.2}, max {:.2})",
                name, s.mean, s.std_dev, s.min, s.max
            ),
            None => eprintln!("{:<18} -", name),
        }
    }
}

fn write_outputs(dir: &Path, config: &PipelineConfig, output: &PipelineOutput) -> Result<()> {
    fs::create_dir_all(dir).context("Failed to create output directory")?;

    let buffers: [(&str, &SampleBuffer); 5] = [
        ("original", &output.original),
        ("filtered", &output.filtered),
        ("noise", &output.noise),
        ("noisy", &output.noisy),
        ("filtered_noisy", &output.filtered_noisy),
    ];
    for (name, buffer) in buffers {
        write_csv(&dir.join(format!("{}.csv", name)), |w| write_buffer_csv(w, buffer))?;
        let wav_path = dir.join(format!("{}.wav", name));
        save_wav(&wav_path, buffer)
            .with_context(|| format!("Failed to write {}", wav_path.display()))?;
    }

    write_csv(&dir.join("spectrum.csv"), |w| write_spectrum_csv(w, &output.spectrum))?;
    write_csv(&dir.join("taps.csv"), |w| write_taps_csv(w, &output.taps))?;

    fs::write(dir.join("config.toml"), config.to_toml_string()?)
        .context("Failed to write config.toml")?;
    Ok(())
}

fn write_csv<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write(&mut writer).with_context(|| format!("Failed to write {}", path.display()))?;
    writer.flush().with_context(|| format!("Failed to flush {}", path.display()))?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}
