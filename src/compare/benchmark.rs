// src/compare/benchmark.rs
//
// Per-metric deltas, z-scores and range classification against a benchmark

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::{BenchmarkProfile, MetricTarget};
use crate::core::{AnalysisResult, MetricId};

/// Standard deviations at or below this are treated as missing
pub const STDDEV_EPSILON: f64 = 1e-12;

/// Distance outside `[min, max]`, as a fraction of the span, still counted
/// as slightly off
pub const RANGE_TOLERANCE_FRACTION: f64 = 0.10;

/// Four-way classification of a metric against its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InRangeClass {
    Unknown,
    InRange,
    SlightlyOff,
    NeedsAttention,
}

impl InRangeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            InRangeClass::Unknown => "UNKNOWN",
            InRangeClass::InRange => "IN_RANGE",
            InRangeClass::SlightlyOff => "SLIGHTLY_OFF",
            InRangeClass::NeedsAttention => "NEEDS_ATTENTION",
        }
    }
}

impl std::fmt::Display for InRangeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison outcome for one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub value: Option<f64>,
    pub mean: Option<f64>,
    pub delta: Option<f64>,
    pub z: Option<f64>,
    pub in_range: InRangeClass,
}

impl MetricDelta {
    /// A metric that could not be compared
    pub fn unknown(value: Option<f64>) -> Self {
        Self {
            value,
            mean: None,
            delta: None,
            z: None,
            in_range: InRangeClass::Unknown,
        }
    }
}

impl Default for MetricDelta {
    fn default() -> Self {
        Self::unknown(None)
    }
}

/// Classification tally across all compared metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkCompareSummary {
    pub in_range_count: usize,
    pub slightly_off_count: usize,
    pub needs_attention_count: usize,
    pub unknown_count: usize,
}

impl BenchmarkCompareSummary {
    fn tally(&mut self, class: InRangeClass) {
        match class {
            InRangeClass::InRange => self.in_range_count += 1,
            InRangeClass::SlightlyOff => self.slightly_off_count += 1,
            InRangeClass::NeedsAttention => self.needs_attention_count += 1,
            InRangeClass::Unknown => self.unknown_count += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.in_range_count + self.slightly_off_count + self.needs_attention_count + self.unknown_count
    }
}

/// Benchmark comparison of one analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkCompareResult {
    pub profile_id: String,
    pub genre: String,
    pub deltas: BTreeMap<MetricId, MetricDelta>,
    pub summary: BenchmarkCompareSummary,
}

impl BenchmarkCompareResult {
    /// Delta for a metric; metrics never compared read as unknown
    pub fn metric(&self, id: MetricId) -> MetricDelta {
        self.deltas.get(&id).copied().unwrap_or_default()
    }

    /// Replace one metric's delta and recount the summary
    pub fn set_metric(&mut self, id: MetricId, delta: MetricDelta) {
        self.deltas.insert(id, delta);
        self.recount();
    }

    /// Recompute the summary over all 20 metrics
    pub fn recount(&mut self) {
        let mut summary = BenchmarkCompareSummary::default();
        for id in MetricId::ALL {
            summary.tally(self.metric(id).in_range);
        }
        self.summary = summary;
    }
}

/// Classify a present value against its target.
///
/// A complete `[min, max]` range takes precedence over the z-score.
pub fn classify(value: f64, target: &MetricTarget, z: Option<f64>) -> InRangeClass {
    if let Some((min, max)) = target.range() {
        if value >= min && value <= max {
            return InRangeClass::InRange;
        }
        let span = (max - min).max(1e-9);
        let dist = if value < min { min - value } else { value - max };
        return if dist <= RANGE_TOLERANCE_FRACTION * span {
            InRangeClass::SlightlyOff
        } else {
            InRangeClass::NeedsAttention
        };
    }

    match z.map(f64::abs) {
        Some(az) if az < 1.0 => InRangeClass::InRange,
        Some(az) if az < 2.0 => InRangeClass::SlightlyOff,
        Some(_) => InRangeClass::NeedsAttention,
        None => InRangeClass::Unknown,
    }
}

/// Compare one optional value with an optional target
pub fn compare_metric(value: Option<f64>, target: Option<&MetricTarget>) -> MetricDelta {
    let (Some(v), Some(target)) = (value, target) else {
        return MetricDelta::unknown(value);
    };

    let delta = v - target.mean;
    let z = target
        .stddev
        .filter(|&s| s > STDDEV_EPSILON)
        .map(|s| delta / s);

    MetricDelta {
        value,
        mean: Some(target.mean),
        delta: Some(delta),
        z,
        in_range: classify(v, target, z),
    }
}

/// Compare all 20 tracked metrics of an analysis with a benchmark profile
pub fn compare_against_benchmark(
    analysis: &AnalysisResult,
    profile: &BenchmarkProfile,
) -> BenchmarkCompareResult {
    let deltas = MetricId::ALL
        .iter()
        .map(|&id| (id, compare_metric(analysis.metric(id), profile.target(id))))
        .collect();

    let mut out = BenchmarkCompareResult {
        profile_id: profile.profile_id.clone(),
        genre: profile.genre.clone(),
        deltas,
        summary: BenchmarkCompareSummary::default(),
    };
    out.recount();

    debug!(
        "Benchmark '{}': {} in range, {} slightly off, {} need attention, {} unknown",
        out.profile_id,
        out.summary.in_range_count,
        out.summary.slightly_off_count,
        out.summary.needs_attention_count,
        out.summary.unknown_count
    );
    out
}
