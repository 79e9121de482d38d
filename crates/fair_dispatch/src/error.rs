//! Dispatch error types

use thiserror::Error;

use contracts::{PartitionKey, StreamError};

/// Dispatch-specific errors
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Handler failed while processing a record; the worker stops and
    /// queued records are abandoned
    #[error("handler failed on record for key '{key}': {source}")]
    Handler {
        key: PartitionKey,
        #[source]
        source: StreamError,
    },

    /// Record rejected because the dispatcher is already terminated
    #[error("dispatcher is terminated; record for key '{key}' was rejected")]
    Terminated { key: PartitionKey },

    /// Dispatch worker task died without reporting (panic or abort)
    #[error("dispatch worker task failed: {message}")]
    Worker { message: String },

    /// Contract-level error (key projection, handler init/teardown)
    #[error("contract error: {0}")]
    Contract(#[from] StreamError),
}

impl DispatchError {
    /// Create a worker task failure
    pub fn worker(message: impl Into<String>) -> Self {
        Self::Worker {
            message: message.into(),
        }
    }
}
