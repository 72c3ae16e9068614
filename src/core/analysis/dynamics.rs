// src/core/analysis/dynamics.rs
//
// Dynamics: standalone peak/RMS/crest plus a percentile dynamic-range proxy

use serde::{Deserialize, Serialize};

use super::whole_frames;
use crate::core::dsp::{amplitude_to_db, percentile_sorted};

/// Lower percentile of the DR proxy
pub const DR_LOW_PERCENTILE: f64 = 0.10;
/// Upper percentile of the DR proxy
pub const DR_HIGH_PERCENTILE: f64 = 0.95;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DynamicsMetrics {
    pub peak_dbfs: Option<f64>,
    pub rms_dbfs: Option<f64>,
    pub crest_db: Option<f64>,
    /// dB(p95 |x|) - dB(p10 |x|)
    pub dr_proxy_db: Option<f64>,
}

/// Compute dynamics over all interleaved samples.
///
/// Peak, RMS and crest are recomputed here rather than borrowed from the
/// basic analyzer; the façade reconciles the two afterwards.
pub fn compute_dynamics(samples: &[f32]) -> DynamicsMetrics {
    let samples = whole_frames(samples);
    if samples.is_empty() {
        return DynamicsMetrics::default();
    }

    let mut peak = 0.0f64;
    let mut sum_sq = 0.0f64;
    let mut magnitudes = Vec::with_capacity(samples.len());
    for &s in samples {
        let s = s as f64;
        let a = s.abs();
        peak = peak.max(a);
        sum_sq += s * s;
        magnitudes.push(a);
    }

    let rms = (sum_sq / samples.len() as f64).sqrt();
    let peak_dbfs = amplitude_to_db(peak);
    let rms_dbfs = amplitude_to_db(rms);
    let crest_db = peak_dbfs.zip(rms_dbfs).map(|(p, r)| p - r);

    magnitudes.sort_by(f64::total_cmp);
    let p10_db = percentile_sorted(&magnitudes, DR_LOW_PERCENTILE).and_then(amplitude_to_db);
    let p95_db = percentile_sorted(&magnitudes, DR_HIGH_PERCENTILE).and_then(amplitude_to_db);
    let dr_proxy_db = p95_db.zip(p10_db).map(|(high, low)| high - low);

    DynamicsMetrics {
        peak_dbfs,
        rms_dbfs,
        crest_db,
        dr_proxy_db,
    }
}
