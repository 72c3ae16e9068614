//! Error types for mix analysis

use thiserror::Error;

/// Result type for mixcheckr operations
pub type Result<T> = std::result::Result<T, MixError>;

/// Errors that can occur while analyzing or comparing a mix
#[derive(Error, Debug)]
pub enum MixError {
    /// Sample rate was zero, negative or NaN
    #[error("Invalid sample rate: {0} Hz (must be > 0)")]
    InvalidSampleRate(f64),

    /// Fewer samples than `frame_count` stereo frames require
    #[error("Sample buffer holds {available} values but {frame_count} stereo frames were requested")]
    BufferTooShort { frame_count: usize, available: usize },

    /// FFT input length was zero or not a power of two
    #[error("FFT size must be a non-zero power of two, got {0}")]
    InvalidFftSize(usize),

    /// Reference comparison was called with no references
    #[error("Reference comparison requires at least one reference analysis")]
    NoReferences,

    /// A reference analysis was produced by a different schema than the mix
    #[error("Schema version mismatch: mix has {expected}, reference {index} has {found}")]
    SchemaMismatch {
        index: usize,
        expected: u32,
        found: u32,
    },

    /// Benchmark profile parsed but holds unusable targets
    #[error("Invalid benchmark profile: {0}")]
    InvalidProfile(String),

    /// JSON parsing error (profiles, configuration)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Audio decoding error
    #[error("Failed to decode audio: {0}")]
    Decode(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MixError {
    /// Whether this error rejects the caller's input outright.
    ///
    /// Missing data never surfaces as an error; it travels as absent metrics instead.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            MixError::InvalidSampleRate(_)
                | MixError::BufferTooShort { .. }
                | MixError::InvalidFftSize(_)
                | MixError::NoReferences
                | MixError::SchemaMismatch { .. }
        )
    }
}

impl From<symphonia::core::errors::Error> for MixError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
