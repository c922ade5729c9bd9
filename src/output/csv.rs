use super::{Formatter, iso8601_timestamp};
use crate::pipeline::RunReport;

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, report: &RunReport) -> String {
        let seed = report.seed.map_or(String::new(), |s| s.to_string());
        format!(
            "{},{},{},{},{:.3},{:.3},{},{:.12},{},{:.3},{:.3},{:.3},{:.3}",
            iso8601_timestamp(),
            seed,
            report.num_samples,
            report.sample_rate,
            report.peak_frequency_hz,
            report.peak_magnitude,
            report.num_taps,
            report.dc_gain,
            report.group_delay_samples,
            report.passband_gain_db,
            report.input_snr_db,
            report.output_snr_db,
            report.noise_attenuation_db
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some(
            "ts,seed,num_samples,sample_rate,peak_hz,peak_magnitude,num_taps,dc_gain,group_delay,passband_gain_db,input_snr_db,output_snr_db,noise_attenuation_db",
        )
    }
}
