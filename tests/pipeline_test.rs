// tests/pipeline_test.rs
//
// End-to-end: WAV fixtures on disk -> decode -> analysis -> MixReport, plus
// profile/config loading and CLI output formatting.

mod test_utils;

use std::fs;

use clap::Parser;
use mixcheckr::cli::{self, collect_audio_files, format_json, format_report, Args, FileReport};
use mixcheckr::config::{BenchmarkProfile, EngineConfig, MetricTarget, ProfileBuilder};
use mixcheckr::core::decoder::decode_audio;
use mixcheckr::core::{Analyzer, MetricId};
use mixcheckr::detection::{template_for, IssueKind};
use mixcheckr::testgen;
use mixcheckr::{MixError, MixReport};

use test_utils::{analyze, assert_close, scratch_dir, write_float_wav, SAMPLE_RATE};

fn club_profile() -> BenchmarkProfile {
    ProfileBuilder::new("club_v1", "edm")
        .track_count(8)
        .target(MetricId::LoudnessIntegrated, MetricTarget::new(-14.0).with_stddev(1.0))
        .target(MetricId::StereoCorrelation, MetricTarget::new(0.8).with_range(0.5, 1.0))
        .build()
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_decode_stereo_float_wav() {
    let dir = scratch_dir("decode-stereo");
    let path = dir.join("tone.wav");
    let samples = testgen::stereo_sine_with_gains(440.0, 0.5, 44_100.0, 4410, 1.0, 0.5);
    write_float_wav(&path, &samples, 2, 44_100);

    let audio = decode_audio(&path).unwrap();
    assert_eq!(audio.sample_rate, 44_100);
    assert_eq!(audio.source_channels, 2);
    assert_eq!(audio.frame_count(), 4410);
    assert_close(audio.duration_secs, 0.1, 1e-6);
    for (decoded, written) in audio.samples.iter().zip(&samples) {
        assert_close(*decoded as f64, *written as f64, 1e-7);
    }

    let from_file = Analyzer::new().analyze_file(&path).unwrap();
    let from_memory = Analyzer::new().analyze(&samples, 44_100.0).unwrap();
    assert_eq!(from_file.frame_count, from_memory.frame_count);
    assert_close(
        from_file.basic.rms_dbfs.unwrap(),
        from_memory.basic.rms_dbfs.unwrap(),
        1e-6,
    );
    assert!(from_file.stereo.lr_balance_db.unwrap() > 5.9);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_decode_mono_duplicates_channels() {
    let dir = scratch_dir("decode-mono");
    let path = dir.join("mono.wav");
    let mono = testgen::sine(1000.0, 0.25, SAMPLE_RATE, 4800);
    write_float_wav(&path, &mono, 1, 48_000);

    let audio = decode_audio(&path).unwrap();
    assert_eq!(audio.source_channels, 1);
    assert_eq!(audio.frame_count(), 4800);
    for frame in audio.samples.chunks_exact(2) {
        assert_eq!(frame[0], frame[1]);
    }

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_decode_missing_file_fails() {
    let err = decode_audio(std::path::Path::new("/nonexistent/mix.wav")).unwrap_err();
    assert!(matches!(err, MixError::Io(_)));
    assert!(!err.is_invalid_input());
}

#[test]
fn test_collect_audio_files_walks_and_sorts() {
    let dir = scratch_dir("collect");
    fs::create_dir_all(dir.join("stems")).unwrap();
    let silence = testgen::silence(16);
    write_float_wav(&dir.join("b.wav"), &silence, 2, 48_000);
    write_float_wav(&dir.join("stems").join("a.wav"), &silence, 2, 48_000);
    fs::write(dir.join("notes.txt"), "not audio").unwrap();

    let files = collect_audio_files(&[dir.clone(), dir.join("b.wav")]);
    assert_eq!(files, vec![dir.join("b.wav"), dir.join("stems").join("a.wav")]);

    let _ = fs::remove_dir_all(dir);
}

// ============================================================================
// Command line runs
// ============================================================================

fn cli_args(extra: &[&str]) -> Args {
    let mut argv = vec!["mixcheckr"];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).unwrap()
}

#[test]
fn test_run_with_reference_writes_comparison() {
    let dir = scratch_dir("run-reference");
    let mix = dir.join("mix.wav");
    let reference = dir.join("reference.wav");
    let out = dir.join("out.json");
    write_float_wav(&mix, &testgen::stereo_sine(440.0, 0.5, SAMPLE_RATE, 4800), 2, 48_000);
    write_float_wav(&reference, &testgen::stereo_sine(440.0, 0.2, SAMPLE_RATE, 4800), 2, 48_000);

    let args = cli_args(&[
        mix.to_str().unwrap(),
        "-r",
        reference.to_str().unwrap(),
        "-f",
        "json",
        "--no-progress",
        "-o",
        out.to_str().unwrap(),
    ]);
    cli::run(&args).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value[0]["report"]["reference_compare"]["reference_count"], 1);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_run_fails_on_missing_reference() {
    let dir = scratch_dir("run-missing-reference");
    let mix = dir.join("mix.wav");
    let out = dir.join("out.json");
    write_float_wav(&mix, &testgen::stereo_sine(440.0, 0.5, SAMPLE_RATE, 4800), 2, 48_000);

    let args = cli_args(&[
        mix.to_str().unwrap(),
        "-r",
        "/definitely/missing/reference.wav",
        "-f",
        "json",
        "--no-progress",
        "-o",
        out.to_str().unwrap(),
    ]);
    let err = cli::run(&args).unwrap_err();
    assert!(err.to_string().contains("Reference not found"));
    assert!(!out.exists());

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_reference_directory_without_audio_is_rejected() {
    let dir = scratch_dir("empty-reference-dir");
    let refs = dir.join("refs");
    fs::create_dir_all(&refs).unwrap();
    fs::write(refs.join("readme.txt"), "no audio here").unwrap();

    let err = cli::collect_reference_files(&[refs.clone()]).unwrap_err();
    assert!(err.to_string().contains("No audio files"));

    write_float_wav(&refs.join("ref.wav"), &testgen::silence(16), 2, 48_000);
    let files = cli::collect_reference_files(&[refs.clone()]).unwrap();
    assert_eq!(files, vec![refs.join("ref.wav")]);

    let _ = fs::remove_dir_all(dir);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_profile_and_config_load_from_disk() {
    let dir = scratch_dir("config");
    let profile_path = dir.join("club.json");
    fs::write(&profile_path, club_profile().to_json_pretty().unwrap()).unwrap();
    let loaded = BenchmarkProfile::load(&profile_path).unwrap();
    assert_eq!(loaded, club_profile());

    let config_path = dir.join("engine.json");
    fs::write(
        &config_path,
        r#"{ "true_peak_oversample": 8, "rules": { "true_peak_max_dbfs": -2.0 } }"#,
    )
    .unwrap();
    let config = EngineConfig::load(&config_path).unwrap();
    assert_eq!(config.true_peak_oversample, 8);
    assert_eq!(config.rules.true_peak_max_dbfs, -2.0);
    assert_eq!(config.rules.harsh_mids_delta_db, 1.5);
    assert_eq!(config.scoring, EngineConfig::default().scoring);

    let _ = fs::remove_dir_all(dir);
}

// ============================================================================
// Full report
// ============================================================================

#[test]
fn test_hot_mix_report() {
    let mix = analyze(&testgen::stereo_sine(1000.0, 1.0, SAMPLE_RATE, 48_000));
    let references = vec![
        analyze(&testgen::stereo_sine(1000.0, 0.2, SAMPLE_RATE, 48_000)),
        analyze(&testgen::stereo_sine(1000.0, 0.25, SAMPLE_RATE, 48_000)),
    ];
    let profile = club_profile();
    let report = MixReport::build(mix, Some(&profile), &references, &EngineConfig::default()).unwrap();

    let bench = report.benchmark_compare.as_ref().unwrap();
    assert_eq!(bench.summary.total(), 20);
    assert_eq!(bench.summary.unknown_count, 18);
    assert!(report.score.is_some());
    assert_eq!(report.reference_compare.as_ref().unwrap().reference_count, 2);

    assert_eq!(report.issues.ids()[0], "LOUDNESS_TOO_HOT");
    assert!(report.issues.contains(IssueKind::TruePeakRisk));
    assert_eq!(report.issues.top_issues[0].confidence_0_100, 100.0);

    let text = format_report("hot.wav", &report, true);
    assert!(text.contains(template_for(IssueKind::LoudnessTooHot).title));
    assert!(text.contains("loudness.integrated_lufs"));

    let json = format_json(&[FileReport {
        file: "hot.wav".to_string(),
        report: &report,
    }])
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["file"], "hot.wav");
    assert_eq!(value[0]["report"]["issues"]["top_issues"][0]["id"], "LOUDNESS_TOO_HOT");
    assert_eq!(
        value[0]["report"]["benchmark_compare"]["deltas"]["stereo.correlation"]["in_range"],
        "IN_RANGE"
    );
}

#[test]
fn test_report_without_inputs_only_analyzes() {
    let mix = analyze(&testgen::stereo_sine(1000.0, 0.25, SAMPLE_RATE, 48_000));
    let report = MixReport::build(mix, None, &[], &EngineConfig::default()).unwrap();
    assert!(report.benchmark_compare.is_none());
    assert!(report.score.is_none());
    assert!(report.reference_compare.is_none());
    assert!(report.issues.top_issues.is_empty());

    let json = serde_json::to_value(&report).unwrap();
    assert!(json.get("score").is_none());
    assert!(format_report("quiet.wav", &report, false).contains("No issues detected"));
}

#[test]
fn test_report_propagates_reference_errors() {
    let mix = analyze(&testgen::stereo_sine(1000.0, 0.25, SAMPLE_RATE, 4800));
    let mut stale = mix.clone();
    stale.schema_version = 0;
    let err = MixReport::build(mix, None, &[stale], &EngineConfig::default()).unwrap_err();
    assert!(matches!(err, MixError::SchemaMismatch { index: 0, .. }));
}
