//! WAV export of sample buffers.
//!
//! A presentation helper for the `sinclab` binary, outside the numeric
//! core: no generator, transform, design or filter routine touches the
//! filesystem.

use std::path::Path;

use hound::{WavSpec, WavWriter};

use crate::buffer::SampleBuffer;

/// Save a buffer as a mono 32-bit float WAV file
///
/// The sample rate is rounded to the nearest integer Hz.
pub fn save_wav<P: AsRef<Path>>(path: P, buffer: &SampleBuffer) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate().round() as u32,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;

    for &sample in buffer.samples() {
        writer.write_sample(sample as f32)?;
    }

    writer.finalize()?;
    Ok(())
}
