//! Layered error definitions
//!
//! Categorized by source: key projection / handler / general

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum StreamError {
    // ===== Key Projection Errors =====
    /// Record has no fields to project a key from
    #[error("record has no fields; cannot project a partition key")]
    KeyMissing,

    /// Key field holds a value kind that cannot serve as a key
    #[error("field {index} of kind '{kind}' cannot be used as a partition key")]
    KeyUnsupported { index: usize, kind: &'static str },

    // ===== Handler Errors =====
    /// Handler initialization error
    #[error("handler '{handler}' init error: {message}")]
    HandlerInit { handler: String, message: String },

    /// Handler processing error
    #[error("handler '{handler}' process error: {message}")]
    HandlerProcess { handler: String, message: String },

    /// Handler teardown error
    #[error("handler '{handler}' teardown error: {message}")]
    HandlerTeardown { handler: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl StreamError {
    /// Create handler init error
    pub fn handler_init(handler: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HandlerInit {
            handler: handler.into(),
            message: message.into(),
        }
    }

    /// Create handler processing error
    pub fn handler_process(handler: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HandlerProcess {
            handler: handler.into(),
            message: message.into(),
        }
    }

    /// Create handler teardown error
    pub fn handler_teardown(handler: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HandlerTeardown {
            handler: handler.into(),
            message: message.into(),
        }
    }
}
