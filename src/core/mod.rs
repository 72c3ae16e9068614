//! Core analysis modules

pub mod analysis;
pub mod analyzer;
pub mod decoder;
pub mod dsp;
pub mod result;

pub use analyzer::{Analyzer, AnalyzerBuilder, DEFAULT_TRUE_PEAK_OVERSAMPLE};
pub use decoder::{decode_audio, AudioData};
pub use result::{AnalysisResult, MetricGroup, MetricId, ANALYSIS_SCHEMA_VERSION};
