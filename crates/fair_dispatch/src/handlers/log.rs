//! LogHandler - logs record summaries via tracing

use tracing::{info, instrument};

use contracts::{NodeContext, OutputSchema, Record, RecordHandler, StreamError};

/// Handler that logs record summaries for debugging
pub struct LogHandler {
    name: String,
}

impl LogHandler {
    /// Create a new LogHandler with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn log_record_summary(&self, record: &Record) {
        info!(
            handler = %self.name,
            request_id = ?record.request_id,
            fields = record.values.len(),
            payload_len = record.payload.len(),
            "record received"
        );
    }
}

impl RecordHandler for LogHandler {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "log_handler_init", skip(self, ctx), fields(handler = %self.name))]
    async fn init(&mut self, ctx: &NodeContext) -> Result<(), StreamError> {
        info!(handler = %self.name, node = %ctx.node_id, "LogHandler ready");
        Ok(())
    }

    #[instrument(name = "log_handler_process", skip(self, record), fields(handler = %self.name))]
    async fn process(&mut self, record: &Record) -> Result<(), StreamError> {
        self.log_record_summary(record);
        Ok(())
    }

    #[instrument(name = "log_handler_teardown", skip(self))]
    async fn teardown(&mut self) -> Result<(), StreamError> {
        info!(handler = %self.name, "LogHandler closed");
        Ok(())
    }

    fn output_schema(&self) -> OutputSchema {
        // Emits nothing
        OutputSchema::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_log_handler_process() {
        let mut handler = LogHandler::new("test_log");
        let record = Record::new(vec![json!("key"), json!(1)]);

        let result = handler.process(&record).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_log_handler_name() {
        let handler = LogHandler::new("my_logger");
        assert_eq!(handler.name(), "my_logger");
    }

    #[tokio::test]
    async fn test_log_handler_has_no_completion_capability() {
        let handler = LogHandler::new("log");
        assert!(!handler.handles_completion());
        assert_eq!(handler.output_schema(), OutputSchema::empty());
    }
}
