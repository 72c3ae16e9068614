// src/core/analysis/loudness.rs
//
// Deterministic loudness proxy. Not a gated BS.1770 meter: integrated
// loudness is the raw mean square of all samples, short-term loudness is the
// loudest 4800-frame window of the mono mix.

use serde::{Deserialize, Serialize};

use super::whole_frames;
use crate::core::dsp::stats;

/// Frames per short-term window (100 ms at 48 kHz, not rescaled for other rates)
pub const SHORT_TERM_WINDOW_FRAMES: usize = 4800;

/// Offset applied to the mean square in dB
pub const LOUDNESS_OFFSET_DB: f64 = -0.691;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoudnessMetrics {
    pub integrated_lufs: Option<f64>,
    pub short_term_lufs: Option<f64>,
    pub loudness_range_lu: Option<f64>,
}

fn mean_square_to_lufs(mean_square: f64) -> Option<f64> {
    (mean_square > 0.0).then(|| LOUDNESS_OFFSET_DB + 10.0 * mean_square.log10())
}

/// Loudest windowed mean square of the (L+R)/2 signal, hopping half a window.
fn max_short_term_mean_square(samples: &[f32], frame_count: usize) -> f64 {
    let hop = SHORT_TERM_WINDOW_FRAMES / 2;
    let mut max_ms = 0.0f64;
    let mut start = 0;

    while start + SHORT_TERM_WINDOW_FRAMES <= frame_count {
        let window = &samples[start * 2..(start + SHORT_TERM_WINDOW_FRAMES) * 2];
        let sum: f64 = window
            .chunks_exact(2)
            .map(|frame| {
                let mono = 0.5 * (frame[0] as f64 + frame[1] as f64);
                mono * mono
            })
            .sum();
        let ms = sum / SHORT_TERM_WINDOW_FRAMES as f64;
        if ms > max_ms {
            max_ms = ms;
        }
        start += hop;
    }

    max_ms
}

/// Compute the loudness proxy of an interleaved stereo buffer.
///
/// The sample rate is accepted for interface symmetry; the window length is a
/// fixed frame count.
pub fn compute_loudness(samples: &[f32], _sample_rate_hz: f64) -> LoudnessMetrics {
    let samples = whole_frames(samples);
    let frame_count = samples.len() / 2;
    if frame_count == 0 {
        return LoudnessMetrics::default();
    }

    let mean_square = stats::mean_square(samples);
    let short_term_ms = if frame_count >= SHORT_TERM_WINDOW_FRAMES {
        max_short_term_mean_square(samples, frame_count)
    } else {
        mean_square
    };

    let integrated_lufs = mean_square_to_lufs(mean_square);
    let short_term_lufs = mean_square_to_lufs(short_term_ms);
    let loudness_range_lu = short_term_lufs
        .zip(integrated_lufs)
        .map(|(short_term, integrated)| short_term - integrated);

    LoudnessMetrics {
        integrated_lufs,
        short_term_lufs,
        loudness_range_lu,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_buffer_uses_integrated_energy() {
        let samples = vec![0.5f32; 2 * 100];
        let metrics = compute_loudness(&samples, 48000.0);
        let expected = -0.691 + 10.0 * 0.25f64.log10();
        assert!((metrics.integrated_lufs.unwrap() - expected).abs() < 1e-9);
        assert_eq!(metrics.short_term_lufs, metrics.integrated_lufs);
        assert!(metrics.loudness_range_lu.unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_short_term_picks_loudest_window() {
        // quiet first half, loud second half
        let mut samples = vec![0.01f32; 2 * SHORT_TERM_WINDOW_FRAMES];
        samples.extend(vec![0.5f32; 2 * SHORT_TERM_WINDOW_FRAMES]);
        let metrics = compute_loudness(&samples, 48000.0);
        let loud = -0.691 + 10.0 * 0.25f64.log10();
        assert!((metrics.short_term_lufs.unwrap() - loud).abs() < 1e-9);
        assert!(metrics.loudness_range_lu.unwrap() > 0.0);
    }

    #[test]
    fn test_out_of_phase_channels_have_no_short_term_energy() {
        let samples: Vec<f32> = (0..SHORT_TERM_WINDOW_FRAMES)
            .flat_map(|_| [0.5f32, -0.5])
            .collect();
        let metrics = compute_loudness(&samples, 48000.0);
        assert!(metrics.integrated_lufs.is_some());
        assert_eq!(metrics.short_term_lufs, None);
        assert_eq!(metrics.loudness_range_lu, None);
    }

    #[test]
    fn test_silence_is_absent() {
        assert_eq!(compute_loudness(&[0.0; 20], 48000.0), LoudnessMetrics::default());
    }
}
