//! Error handling for pipeline-previews
//!
//! The sequencer itself never fails; these errors cover the surfaces around
//! it: configuration files, the event bridge and pipeline model lookups.

use crate::pipeline::{SocketId, SourceId, StepId};
use thiserror::Error;

/// Main error type for pipeline-previews operations
#[derive(Error, Debug)]
pub enum PreviewError {
    /// A source ID that the pipeline model does not know about
    #[error("Unknown source: {0}")]
    UnknownSource(SourceId),

    /// A step ID that the pipeline model does not know about
    #[error("Unknown step: {0}")]
    UnknownStep(StepId),

    /// A socket ID that the pipeline model does not know about
    #[error("Unknown socket: {0}")]
    UnknownSocket(SocketId),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// The receiving side of the event bridge is gone
    #[error("Channel send error")]
    ChannelSend,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PreviewError>,
    },
}

impl PreviewError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PreviewError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<toml::de::Error> for PreviewError {
    fn from(err: toml::de::Error) -> Self {
        PreviewError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for PreviewError {
    fn from(err: toml::ser::Error) -> Self {
        PreviewError::Config(err.to_string())
    }
}

/// Result type alias for pipeline-previews operations
pub type Result<T> = std::result::Result<T, PreviewError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
