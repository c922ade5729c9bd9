mod noise;
mod sine;

pub use noise::{generate_gaussian_noise, generate_gaussian_noise_with_rng};
pub use sine::generate_sine;
