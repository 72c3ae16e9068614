// src/core/analysis/true_peak.rs
//
// Oversampled peak estimate. Intermediate points between consecutive frames
// are found by linear interpolation, per channel.

use serde::{Deserialize, Serialize};

use super::whole_frames;
use crate::core::dsp::amplitude_to_db;

/// True peak analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruePeakMetrics {
    pub true_peak_dbfs: Option<f64>,
    /// Effective oversampling factor, never below 1
    pub oversample_factor: u32,
}

impl Default for TruePeakMetrics {
    fn default() -> Self {
        Self {
            true_peak_dbfs: None,
            oversample_factor: 1,
        }
    }
}

fn channel_peak(samples: &[f32], channel: usize, factor: u32) -> f64 {
    let mut max_abs = 0.0f64;
    let mut frames = samples.chunks_exact(2).map(|frame| frame[channel] as f64).peekable();

    while let Some(s0) = frames.next() {
        max_abs = max_abs.max(s0.abs());
        if let Some(&s1) = frames.peek() {
            for k in 1..factor {
                let t = k as f64 / factor as f64;
                let interp = s0 + (s1 - s0) * t;
                max_abs = max_abs.max(interp.abs());
            }
        }
    }

    max_abs
}

/// Measure the interpolated peak of both channels.
///
/// A factor of 0 or 1 disables interpolation and reports the sample peak.
pub fn compute_true_peak(samples: &[f32], oversample_factor: u32) -> TruePeakMetrics {
    let factor = oversample_factor.max(1);
    let samples = whole_frames(samples);
    if samples.is_empty() {
        return TruePeakMetrics {
            true_peak_dbfs: None,
            oversample_factor: factor,
        };
    }

    let max_abs = channel_peak(samples, 0, factor).max(channel_peak(samples, 1, factor));

    TruePeakMetrics {
        true_peak_dbfs: amplitude_to_db(max_abs),
        oversample_factor: factor,
    }
}
