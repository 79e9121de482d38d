//! RecordHandler trait - downstream processor interface
//!
//! Defines the abstract interface for delegate handlers.

use crate::{NodeContext, OutputSchema, Record, RequestId, StreamError};

/// Downstream record processor
///
/// Implementations are not assumed thread-safe: the dispatch layer
/// serializes every call, including the optional completion callback.
#[trait_variant::make(RecordHandler: Send)]
pub trait LocalRecordHandler {
    /// Handler name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Prepare handler state
    ///
    /// Called exactly once, before any record is processed.
    async fn init(&mut self, ctx: &NodeContext) -> Result<(), StreamError>;

    /// Process one record
    ///
    /// # Errors
    /// A processing error terminates the dispatch worker; it is never
    /// retried.
    async fn process(&mut self, record: &Record) -> Result<(), StreamError>;

    /// Release handler resources
    async fn teardown(&mut self) -> Result<(), StreamError>;

    /// Declared output fields
    fn output_schema(&self) -> OutputSchema;

    /// Whether this handler consumes request-completion notifications.
    ///
    /// Probed once at dispatcher initialization and cached; not
    /// re-checked per call.
    fn handles_completion(&self) -> bool {
        false
    }

    /// Request-completion callback.
    ///
    /// Only invoked when [`handles_completion`](Self::handles_completion)
    /// returns true.
    fn on_completed(&mut self, request_id: &RequestId) {
        let _ = request_id;
    }
}
