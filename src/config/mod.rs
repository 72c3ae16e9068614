//! Configuration: benchmark profiles and engine settings

mod profiles;
mod settings;

pub use profiles::{
    BasicTargets, BenchmarkMetrics, BenchmarkProfile, DynamicsTargets, LoudnessTargets,
    MetricTarget, ProfileBuilder, SpectralTargets, StereoTargets,
};
pub use settings::{EngineConfig, RuleEngineConfig, ScoreConfig};
