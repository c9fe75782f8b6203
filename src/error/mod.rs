//! Error handling module for the honeypot generator

use thiserror::Error;

/// Main error type for honeypot operations
#[derive(Error, Debug)]
pub enum HoneypotError {
    /// Segment duration below the supported minimum
    #[error("Segment duration ({duration}) is too low, must be at least {minimum}")]
    InvalidSegmentDuration { duration: f64, minimum: f64 },

    /// Metadata probe could not be executed or exited with failure
    #[error("Failed to probe media file {path}: {message}")]
    ProbeFailed { path: String, message: String },

    /// Probe output could not be decoded
    #[error("Failed to decode probe output for {path}: {source}")]
    ProbeDecode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Format duration is not a number
    #[error("Invalid duration '{value}' reported for {path}")]
    InvalidDuration { path: String, value: String },

    /// Input is shorter than one segment
    #[error("File duration ({duration}) is smaller than segment duration ({segment})")]
    InputTooShort { duration: f64, segment: f64 },

    /// External process could not be started
    #[error("Failed to start {program}: {source}")]
    ProcessSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// External process exited with a non-zero status
    #[error("{program} exited with {status}")]
    ProcessFailed { program: String, status: String },

    /// Audio defects need at least one audio stream
    #[error("No audio streams found in {path}")]
    NoAudioStreams { path: String },

    /// Output path could not be derived from the input
    #[error("Invalid input path: {path}")]
    InvalidPath { path: String },

    /// Configuration file error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for honeypot operations
pub type HoneypotResult<T> = std::result::Result<T, HoneypotError>;
