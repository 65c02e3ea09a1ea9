//! Error handling for sieve-rs
//!
//! The sieve itself has no domain errors: every value flowing through the
//! pipeline is a well-formed integer. The variants below cover the runtime
//! around it (spawning stage threads, a stage vanishing from the pipeline,
//! writing the reported primes, loading configuration).

use crate::pipeline::id::StageId;
use thiserror::Error;

/// Main error type for sieve-rs operations
#[derive(Error, Debug)]
pub enum SieveError {
    /// The OS refused to start a stage thread
    #[error("Failed to spawn stage {stage}: {source}")]
    Spawn {
        stage: StageId,
        #[source]
        source: std::io::Error,
    },

    /// The producer of the pipeline tail went away before sending a value.
    ///
    /// Every stage upstream of a dead stage blocks forever, so this is the
    /// only way the liveness defect becomes observable.
    #[error("Pipeline tail disconnected: stage {stage} is no longer producing")]
    StageDisconnected { stage: StageId },

    /// A stage thread panicked instead of returning
    #[error("Stage {stage} panicked")]
    StagePanicked { stage: StageId },

    /// Writing a reported prime failed
    #[error("Output error: {0}")]
    Output(#[source] std::io::Error),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<SieveError>,
    },
}

impl SieveError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        SieveError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for sieve-rs operations
pub type Result<T> = std::result::Result<T, SieveError>;

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
