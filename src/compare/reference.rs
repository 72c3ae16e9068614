// src/compare/reference.rs
//
// Comparison against one or more reference tracks: per-track deltas, a
// virtual averaged reference, and per-group closeness scores.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::dsp::{mean_present, optional_delta};
use crate::core::{AnalysisResult, MetricGroup, MetricId};
use crate::error::{MixError, Result};

/// Delta scale for a group's closeness score (dB, LU, or unitless for stereo)
pub fn closeness_scale(group: MetricGroup) -> f64 {
    match group {
        MetricGroup::Basic => 3.0,
        MetricGroup::Loudness => 3.0,
        MetricGroup::Spectral => 6.0,
        MetricGroup::Stereo => 0.5,
        MetricGroup::Dynamics => 3.0,
    }
}

/// One metric of one reference: `delta = mix - reference`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceMetricDelta {
    pub metric: MetricId,
    pub mix: Option<f64>,
    pub reference: Option<f64>,
    pub delta: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDeltaPerTrack {
    pub reference_index: usize,
    /// All 20 metrics in canonical order
    pub deltas: Vec<ReferenceMetricDelta>,
}

impl ReferenceDeltaPerTrack {
    pub fn delta(&self, id: MetricId) -> Option<f64> {
        self.deltas.iter().find(|d| d.metric == id).and_then(|d| d.delta)
    }
}

/// Closeness to the averaged reference, each 0-100
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDistanceSummary {
    pub basic_closeness_0_100: f64,
    pub loudness_closeness_0_100: f64,
    pub spectral_closeness_0_100: f64,
    pub stereo_closeness_0_100: f64,
    pub dynamics_closeness_0_100: f64,
    pub overall_closeness_0_100: f64,
}

impl ReferenceDistanceSummary {
    pub fn for_group(&self, group: MetricGroup) -> f64 {
        match group {
            MetricGroup::Basic => self.basic_closeness_0_100,
            MetricGroup::Loudness => self.loudness_closeness_0_100,
            MetricGroup::Spectral => self.spectral_closeness_0_100,
            MetricGroup::Stereo => self.stereo_closeness_0_100,
            MetricGroup::Dynamics => self.dynamics_closeness_0_100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCompareResult {
    pub schema_version: u32,
    pub reference_count: usize,
    pub per_reference: Vec<ReferenceDeltaPerTrack>,
    /// Mix analysis with every tracked metric replaced by the reference mean
    pub reference_average: AnalysisResult,
    pub distance: ReferenceDistanceSummary,
}

/// Average of `100 / (1 + |d| / scale)` over the defined deltas; 0 if none
fn group_closeness(deltas: impl Iterator<Item = Option<f64>>, scale: f64) -> f64 {
    let scale = scale.max(1e-9);
    let (sum, n) = deltas
        .flatten()
        .map(|d| 100.0 / (1.0 + d.abs() / scale))
        .fold((0.0, 0usize), |(sum, n), score| (sum + score, n + 1));
    if n == 0 {
        return 0.0;
    }
    (sum / n as f64).clamp(0.0, 100.0)
}

fn per_track(mix: &AnalysisResult, reference: &AnalysisResult, index: usize) -> ReferenceDeltaPerTrack {
    let deltas = MetricId::ALL
        .iter()
        .map(|&metric| {
            let mix_value = mix.metric(metric);
            let reference_value = reference.metric(metric);
            ReferenceMetricDelta {
                metric,
                mix: mix_value,
                reference: reference_value,
                delta: optional_delta(mix_value, reference_value),
            }
        })
        .collect();

    ReferenceDeltaPerTrack {
        reference_index: index,
        deltas,
    }
}

/// Compare a mix with a non-empty list of reference analyses.
///
/// Every reference must share the mix's schema version.
pub fn compare_to_references(
    mix: &AnalysisResult,
    references: &[AnalysisResult],
) -> Result<ReferenceCompareResult> {
    if references.is_empty() {
        return Err(MixError::NoReferences);
    }
    if let Some((index, reference)) = references
        .iter()
        .enumerate()
        .find(|(_, r)| r.schema_version != mix.schema_version)
    {
        return Err(MixError::SchemaMismatch {
            index,
            expected: mix.schema_version,
            found: reference.schema_version,
        });
    }

    let per_reference = references
        .iter()
        .enumerate()
        .map(|(i, reference)| per_track(mix, reference, i))
        .collect();

    let mut reference_average = mix.clone();
    for id in MetricId::ALL {
        *reference_average.metric_mut(id) = mean_present(references.iter().map(|r| r.metric(id)));
    }

    let closeness = |group: MetricGroup| {
        let deltas = group
            .metrics()
            .iter()
            .map(|&id| optional_delta(mix.metric(id), reference_average.metric(id)));
        group_closeness(deltas, closeness_scale(group))
    };

    let mut distance = ReferenceDistanceSummary {
        basic_closeness_0_100: closeness(MetricGroup::Basic),
        loudness_closeness_0_100: closeness(MetricGroup::Loudness),
        spectral_closeness_0_100: closeness(MetricGroup::Spectral),
        stereo_closeness_0_100: closeness(MetricGroup::Stereo),
        dynamics_closeness_0_100: closeness(MetricGroup::Dynamics),
        overall_closeness_0_100: 0.0,
    };
    distance.overall_closeness_0_100 = (distance.basic_closeness_0_100
        + distance.loudness_closeness_0_100
        + distance.spectral_closeness_0_100
        + distance.stereo_closeness_0_100
        + distance.dynamics_closeness_0_100)
        / 5.0;

    debug!(
        "Compared against {} references, overall closeness {:.1}",
        references.len(),
        distance.overall_closeness_0_100
    );

    Ok(ReferenceCompareResult {
        schema_version: mix.schema_version,
        reference_count: references.len(),
        per_reference,
        reference_average,
        distance,
    })
}
