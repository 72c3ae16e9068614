// src/core/analysis/stereo.rs
//
// Stereo field: inter-channel correlation, balance and mid/side width

use serde::{Deserialize, Serialize};

use super::whole_frames;

/// Stereo analysis results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StereoMetrics {
    /// Pearson correlation of L and R, in [-1, 1]
    pub correlation: Option<f64>,
    /// 20*log10(rms_L / rms_R)
    pub lr_balance_db: Option<f64>,
    /// rms(side) / (rms(mid) + rms(side)), in [0, 1]
    pub width_proxy: Option<f64>,
}

#[derive(Default)]
struct StereoSums {
    l: f64,
    r: f64,
    ll: f64,
    rr: f64,
    lr: f64,
    mid2: f64,
    side2: f64,
}

/// Analyze stereo characteristics of an interleaved buffer
pub fn compute_stereo(samples: &[f32]) -> StereoMetrics {
    let samples = whole_frames(samples);
    let frame_count = samples.len() / 2;
    if frame_count == 0 {
        return StereoMetrics::default();
    }

    let mut sums = StereoSums::default();
    for frame in samples.chunks_exact(2) {
        let l = frame[0] as f64;
        let r = frame[1] as f64;
        sums.l += l;
        sums.r += r;
        sums.ll += l * l;
        sums.rr += r * r;
        sums.lr += l * r;
        let mid = 0.5 * (l + r);
        let side = 0.5 * (l - r);
        sums.mid2 += mid * mid;
        sums.side2 += side * side;
    }

    let n = frame_count as f64;
    let mean_l = sums.l / n;
    let mean_r = sums.r / n;
    let var_l = (sums.ll / n - mean_l * mean_l).max(0.0);
    let var_r = (sums.rr / n - mean_r * mean_r).max(0.0);
    let cov = sums.lr / n - mean_l * mean_r;
    let denom = (var_l * var_r).sqrt();

    let correlation = (denom > 1e-15).then(|| (cov / denom).clamp(-1.0, 1.0));

    let rms_l = (sums.ll / n).sqrt();
    let rms_r = (sums.rr / n).sqrt();
    let lr_balance_db = (rms_l > 0.0 && rms_r > 0.0).then(|| 20.0 * (rms_l / rms_r).log10());

    let rms_mid = (sums.mid2 / n).sqrt();
    let rms_side = (sums.side2 / n).sqrt();
    let width_denom = rms_mid + rms_side;
    let width_proxy = (width_denom > 0.0).then(|| (rms_side / width_denom).clamp(0.0, 1.0));

    StereoMetrics {
        correlation,
        lr_balance_db,
        width_proxy,
    }
}
