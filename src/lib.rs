//! MixCheckr - Deterministic mix analysis
//!
//! Measures a stereo mix (loudness, true peak, spectral balance, stereo
//! image, dynamics), compares it against a genre benchmark profile or a set
//! of reference tracks, scores it, and diagnoses the most important issues
//! with concrete fix steps.
//!
//! ## Module Structure
//!
//! - `core` - DSP kernels, per-metric analyzers and the `Analyzer` façade
//! - `compare` - Benchmark comparison, reference comparison and scoring
//! - `detection` - Issue rule engine, report types and fix templates
//! - `config` - Benchmark profiles and engine thresholds
//! - `report` - One-call pipeline producing a `MixReport`
//! - `cli` - Command-line interface
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mixcheckr::{Analyzer, BenchmarkProfile, EngineConfig, MixReport};
//!
//! let analysis = Analyzer::new().analyze_file("mix.wav")?;
//! let profile = BenchmarkProfile::load("edm.json")?;
//! let report = MixReport::build(analysis, Some(&profile), &[], &EngineConfig::default())?;
//!
//! for issue in &report.issues.top_issues {
//!     println!("{} ({:?})", issue.title, issue.severity);
//! }
//! ```
//!
//! ## Missing data
//!
//! Every metric is optional. Silence, too-short input or a failed
//! sub-analysis leaves the affected metrics absent; absent values flow
//! through comparison, scoring and the rules without ever becoming zero.

// Core analysis functionality
pub mod core;

// Benchmark/reference comparison and scoring
pub mod compare;

// Command-line interface
pub mod cli;

// Profiles and engine configuration
pub mod config;

// Issue detection
pub mod detection;

pub mod error;
pub mod report;

// Deterministic signal generators for tests
pub mod testgen;

pub use compare::{
    compare_against_benchmark, compare_to_references, compute_score, BenchmarkCompareResult,
    InRangeClass, MetricDelta, ReferenceCompareResult, ScoreBreakdown,
};
pub use config::{BenchmarkProfile, EngineConfig, MetricTarget, ProfileBuilder, RuleEngineConfig, ScoreConfig};
pub use core::{AnalysisResult, Analyzer, AnalyzerBuilder, AudioData, MetricGroup, MetricId};
pub use detection::{diagnose_issues, IssueItem, IssueKind, IssueReport, Severity};
pub use error::{MixError, Result};
pub use report::MixReport;
