//! Digital Signal Processing utilities

pub mod fft;
pub mod stats;
pub mod windows;

pub use fft::{fft_in_place, next_power_of_two, FftProcessor};
pub use stats::{amplitude_to_db, energy_to_db, mean_present, optional_delta, percentile_sorted};
pub use windows::hann_window;
