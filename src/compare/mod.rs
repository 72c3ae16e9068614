//! Comparison of an analysis against a benchmark profile or reference
//! tracks, and the score derived from the benchmark comparison.

mod benchmark;
mod reference;
mod scoring;

pub use benchmark::{
    classify, compare_against_benchmark, compare_metric, BenchmarkCompareResult,
    BenchmarkCompareSummary, InRangeClass, MetricDelta, RANGE_TOLERANCE_FRACTION, STDDEV_EPSILON,
};
pub use reference::{
    closeness_scale, compare_to_references, ReferenceCompareResult, ReferenceDeltaPerTrack,
    ReferenceDistanceSummary, ReferenceMetricDelta,
};
pub use scoring::{compute_score, score_metric, ScoreBreakdown, ScoreGroup};
