//! Audio analysis algorithms
//!
//! Six independent analyzers over the same interleaved stereo buffer:
//! - Basic peak / RMS / crest
//! - Loudness proxy (integrated, short-term, range)
//! - True peak (linear-interpolation oversampling)
//! - Spectral band balance (FFT)
//! - Stereo correlation, balance and width
//! - Dynamics (crest and percentile DR proxy)
//!
//! Every analyzer accepts `&[f32]` with `L R L R ...` ordering. A trailing
//! half frame is ignored. Empty or silent input yields absent fields, never
//! an error.

mod basic;
mod dynamics;
mod loudness;
mod spectral;
mod stereo;
mod true_peak;

pub use basic::{compute_basic_metrics, BasicMetrics};
pub use dynamics::{compute_dynamics, DynamicsMetrics, DR_HIGH_PERCENTILE, DR_LOW_PERCENTILE};
pub use loudness::{compute_loudness, LoudnessMetrics, LOUDNESS_OFFSET_DB, SHORT_TERM_WINDOW_FRAMES};
pub use spectral::{
    compute_spectral_bands, SpectralAnalyzer, SpectralBands, BAND_EDGES_HZ, SPECTRAL_FFT_SIZE,
    SPECTRAL_HOP_SIZE,
};
pub use stereo::{compute_stereo, StereoMetrics};
pub use true_peak::{compute_true_peak, TruePeakMetrics};

/// Longest prefix made of whole stereo frames
pub(crate) fn whole_frames(samples: &[f32]) -> &[f32] {
    &samples[..samples.len() / 2 * 2]
}
