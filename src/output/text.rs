use super::Formatter;
use crate::pipeline::RunReport;

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, report: &RunReport) -> String {
        let seed = report.seed.map_or("-".to_string(), |s| s.to_string());
        if self.verbose {
            format!(
                "Samples:           {} at {} Hz (seed {})\n\
                 Spectrum peak:     {:.2} Hz (|X| = {:.1})\n\
                 Filter:            {} taps, DC gain {:.9}, group delay {} samples\n\
                 Passband gain:     {:>6.2} dB\n\
                 Input SNR:         {:>6.2} dB\n\
                 Output SNR:        {:>6.2} dB (first {} samples skipped)\n\
                 Noise attenuation: {:>6.2} dB",
                report.num_samples,
                report.sample_rate,
                seed,
                report.peak_frequency_hz,
                report.peak_magnitude,
                report.num_taps,
                report.dc_gain,
                report.group_delay_samples,
                report.passband_gain_db,
                report.input_snr_db,
                report.output_snr_db,
                report.transient_samples,
                report.noise_attenuation_db
            )
        } else {
            format!(
                "Peak: {:.2} Hz  taps: {}  SNR: {:>5.1} -> {:>5.1} dB  attenuation: {:>5.1} dB",
                report.peak_frequency_hz,
                report.num_taps,
                report.input_snr_db,
                report.output_snr_db,
                report.noise_attenuation_db
            )
        }
    }
}
