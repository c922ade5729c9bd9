mod design;
mod fir;
mod fir_core;
mod window;

pub use design::{FilterTaps, design_lowpass_fir, design_lowpass_fir_with_window, sinc};
pub use fir::{apply, apply_fft};
pub use fir_core::FirFilterCore;
pub use window::{WindowType, generate_window};

/// Common trait for streaming filters
///
/// Implemented by [`FirFilterCore`].
pub trait Filter {
    /// Process a single sample through the filter
    fn process(&mut self, sample: f64) -> f64;

    /// Process a buffer of samples in-place
    fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Clear the filter history
    fn reset(&mut self);
}
