mod analyzer;
pub mod fft;

pub use analyzer::{FrequencySpectrum, SpectrumBin, fft_frequencies, transform};
pub use fft::{FftAlgorithm, dft, dft_direct};
