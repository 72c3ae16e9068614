// tests/test_utils/mod.rs
//
// Shared helpers for the integration tests: fixtures for benchmark
// comparisons and WAV files written to a scratch directory.

#![allow(dead_code)]

use std::path::PathBuf;

use mixcheckr::compare::{BenchmarkCompareResult, InRangeClass, MetricDelta};
use mixcheckr::core::{AnalysisResult, Analyzer, MetricId};

pub const SAMPLE_RATE: f64 = 48_000.0;

/// Assert two floats agree within `tol`
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {} within {} of {}",
        actual,
        tol,
        expected
    );
}

/// Present delta with an explicit classification
pub fn metric_delta(value: f64, mean: f64, z: Option<f64>, in_range: InRangeClass) -> MetricDelta {
    MetricDelta {
        value: Some(value),
        mean: Some(mean),
        delta: Some(value - mean),
        z,
        in_range,
    }
}

/// Benchmark result holding only the given metrics; everything else is unknown
pub fn bench_with(entries: &[(MetricId, MetricDelta)]) -> BenchmarkCompareResult {
    let mut bench = BenchmarkCompareResult {
        profile_id: "fixture".to_string(),
        genre: "test".to_string(),
        ..BenchmarkCompareResult::default()
    };
    for (id, delta) in entries {
        bench.set_metric(*id, *delta);
    }
    bench
}

/// Analyze an interleaved buffer at the test sample rate
pub fn analyze(samples: &[f32]) -> AnalysisResult {
    Analyzer::new()
        .analyze(samples, SAMPLE_RATE)
        .expect("analysis should accept a positive sample rate")
}

/// Unique scratch directory under the system temp dir
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mixcheckr-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

/// Write 32-bit float WAV with `channels` interleaved channels
pub fn write_float_wav(path: &PathBuf, samples: &[f32], channels: u16, sample_rate: u32) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create wav");
    for &s in samples {
        writer.write_sample(s).expect("write sample");
    }
    writer.finalize().expect("finalize wav");
}
