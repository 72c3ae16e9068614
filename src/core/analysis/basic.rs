// src/core/analysis/basic.rs
//
// Sample peak, RMS and crest factor over all interleaved values

use serde::{Deserialize, Serialize};

use super::whole_frames;
use crate::core::dsp::{amplitude_to_db, stats};

/// Peak, RMS and crest of a stereo buffer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicMetrics {
    pub peak_dbfs: Option<f64>,
    pub rms_dbfs: Option<f64>,
    pub crest_db: Option<f64>,
}

/// Compute peak/RMS/crest over every interleaved sample (both channels pooled)
pub fn compute_basic_metrics(samples: &[f32]) -> BasicMetrics {
    let samples = whole_frames(samples);
    if samples.is_empty() {
        return BasicMetrics::default();
    }

    let peak_dbfs = amplitude_to_db(stats::peak_amplitude(samples));
    let rms_dbfs = amplitude_to_db(stats::rms(samples));
    let crest_db = peak_dbfs.zip(rms_dbfs).map(|(peak, rms)| peak - rms);

    BasicMetrics {
        peak_dbfs,
        rms_dbfs,
        crest_db,
    }
}
