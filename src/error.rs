//! Error types and result utilities for the sample processing pipeline.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Convenience type alias for results that may contain an [`AudioError`].
pub type AudioResult<T> = Result<T, AudioError>;

/// Error types that can occur while loading, transforming or saving audio.
#[derive(Error, Debug)]
pub enum AudioError {
    /// The input file could not be read, is corrupt, or uses an unsupported format.
    ///
    /// Fatal for that input: the pipeline run that requested it is aborted.
    #[error("Failed to decode '{}': {reason}", path.display())]
    Decode {
        /// The file that failed to decode.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// A channel was requested that the buffer does not have.
    #[error("Channel {requested} requested but the buffer only has {available} channel(s)")]
    ChannelMismatch {
        /// Zero-based channel index that was requested.
        requested: usize,
        /// Number of channels actually present.
        available: usize,
    },

    /// An unsupported or out-of-range option was supplied.
    ///
    /// Raised before any file is read or written.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A numeric operation has no meaningful result, e.g. normalizing silence.
    #[error("Numeric degeneracy: {0}")]
    NumericDegeneracy(String),

    /// A buffer or argument list is malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The resampler could not be built or failed while processing.
    #[error("Resampling failed: {0}")]
    Resample(String),

    /// The WAV writer reported an error.
    #[error("WAV encoding failed: {0}")]
    Encode(#[from] hound::Error),

    /// I/O error outside of the decoder and WAV writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Create a new decode error for `path`.
    pub fn decode(path: &Path, reason: impl Into<String>) -> Self {
        Self::Decode {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a new configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a new invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Returns true if the error was caused by configuration rather than data.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
