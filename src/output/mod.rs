//! Presentation helpers: run summaries and buffer dumps.
//!
//! Outside the numeric core. The CSV writers take any [`Write`] sink;
//! opening files is left to the caller.

mod csv;
mod json;
mod text;

use std::io::{self, Write};

use chrono::Utc;

use crate::buffer::SampleBuffer;
use crate::filter::FilterTaps;
use crate::pipeline::RunReport;
use crate::spectrum::FrequencySpectrum;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

/// Renders one run summary per line (or block, for verbose text)
pub trait Formatter: Send {
    fn format(&self, report: &RunReport) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Write a buffer as `t,value` rows
pub fn write_buffer_csv<W: Write>(writer: &mut W, buffer: &SampleBuffer) -> io::Result<()> {
    writeln!(writer, "t,value")?;
    for (t, x) in buffer.times().iter().zip(buffer.samples()) {
        writeln!(writer, "{:.6},{:.9}", t, x)?;
    }
    Ok(())
}

/// Write the positive half of a spectrum as `frequency,magnitude` rows
pub fn write_spectrum_csv<W: Write>(
    writer: &mut W,
    spectrum: &FrequencySpectrum,
) -> io::Result<()> {
    writeln!(writer, "frequency,magnitude")?;
    for bin in spectrum.positive_half() {
        writeln!(writer, "{:.6},{:.9}", bin.frequency, bin.magnitude)?;
    }
    Ok(())
}

/// Write filter taps as `n,coefficient` rows
pub fn write_taps_csv<W: Write>(writer: &mut W, taps: &FilterTaps) -> io::Result<()> {
    writeln!(writer, "n,coefficient")?;
    for (n, h) in taps.coefficients().iter().enumerate() {
        writeln!(writer, "{},{:.12e}", n, h)?;
    }
    Ok(())
}
