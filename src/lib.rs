pub mod buffer;
pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod output;
pub mod pipeline;
pub mod source;
pub mod spectrum;
pub mod wav;

pub use buffer::{FilteredBuffer, SampleBuffer};
pub use config::PipelineConfig;
pub use error::{DspError, Result, Stage};
pub use filter::{FilterTaps, WindowType, apply, design_lowpass_fir};
pub use pipeline::{PipelineOutput, RunReport, run, run_batch};
pub use source::{generate_gaussian_noise, generate_sine};
pub use spectrum::{FrequencySpectrum, transform};
pub use wav::save_wav;
