//! # Integration Tests
//!
//! End-to-end tests over the full dispatch facade:
//! - Contract sanity
//! - Fair-dispatch e2e with mock handlers (no hosting engine required)
//! - Observability smoke

#[cfg(test)]
mod contract_tests {
    use contracts::{OutputSchema, PartitionKey, Record};
    use serde_json::json;

    #[test]
    fn test_contracts_compile() {
        let record = Record::new(vec![json!("k"), json!(1)]);
        assert_eq!(record.partition_key().unwrap(), PartitionKey::from("k"));
        assert_eq!(OutputSchema::empty(), OutputSchema::default());
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};

    use contracts::{
        NodeContext, OutputSchema, PartitionKey, Record, RecordHandler, RequestId, StreamError,
    };
    use fair_dispatch::FairDispatcher;
    use serde_json::json;
    use tokio::sync::Semaphore;
    use tokio::time::{sleep, Duration};

    /// Mock handler capturing the dispatch order
    struct CapturingHandler {
        gate: Option<Arc<Semaphore>>,
        seen: Arc<Mutex<Vec<(PartitionKey, i64)>>>,
        completions: Arc<Mutex<Vec<RequestId>>>,
        in_flight: Arc<AtomicBool>,
        overlaps: Arc<AtomicU64>,
        completion_capable: bool,
    }

    impl CapturingHandler {
        fn new() -> Self {
            Self {
                gate: None,
                seen: Arc::new(Mutex::new(Vec::new())),
                completions: Arc::new(Mutex::new(Vec::new())),
                in_flight: Arc::new(AtomicBool::new(false)),
                overlaps: Arc::new(AtomicU64::new(0)),
                completion_capable: false,
            }
        }
    }

    impl RecordHandler for CapturingHandler {
        fn name(&self) -> &str {
            "capturing"
        }

        async fn init(&mut self, _ctx: &NodeContext) -> Result<(), StreamError> {
            Ok(())
        }

        async fn process(&mut self, record: &Record) -> Result<(), StreamError> {
            if self.in_flight.swap(true, Ordering::SeqCst) {
                self.overlaps.fetch_add(1, Ordering::SeqCst);
            }
            if let Some(gate) = &self.gate {
                let permit = gate.acquire().await;
                permit.expect("gate closed").forget();
            }
            let key = record.partition_key()?;
            let seq = record.values[1].as_i64().unwrap_or(-1);
            self.seen.lock().unwrap().push((key, seq));
            self.in_flight.store(false, Ordering::SeqCst);
            Ok(())
        }

        async fn teardown(&mut self) -> Result<(), StreamError> {
            Ok(())
        }

        fn output_schema(&self) -> OutputSchema {
            OutputSchema::single(["word", "count"])
        }

        fn handles_completion(&self) -> bool {
            self.completion_capable
        }

        fn on_completed(&mut self, request_id: &RequestId) {
            self.completions.lock().unwrap().push(request_id.clone());
        }
    }

    fn record(key: &str, seq: i64) -> Record {
        Record::new(vec![json!(key), json!(seq)])
    }

    /// All records enqueued while the handler is gated on the first one;
    /// once released, service order is the strict rotation.
    #[tokio::test]
    async fn test_e2e_rotation_is_strict_under_backlog() {
        let gate = Arc::new(Semaphore::new(0));
        let mut handler = CapturingHandler::new();
        handler.gate = Some(Arc::clone(&gate));
        let seen = Arc::clone(&handler.seen);

        let ctx = NodeContext::new("rotation_node");
        let dispatcher = FairDispatcher::initialize(handler, &ctx).await.unwrap();

        // Primer is taken first and parks the worker inside process()
        dispatcher.submit(record("z", 0)).unwrap();
        gate.add_permits(1);
        while seen.lock().unwrap().is_empty() {
            sleep(Duration::from_millis(5)).await;
        }

        // Backlog lands while the worker waits for the next permit
        for seq in 1..=2 {
            for key in ["a", "b", "c"] {
                dispatcher.submit(record(key, seq)).unwrap();
            }
        }
        gate.add_permits(6);

        while seen.lock().unwrap().len() < 7 {
            sleep(Duration::from_millis(5)).await;
        }
        dispatcher.teardown().await.unwrap();

        let observed = seen.lock().unwrap().clone();
        let expected: Vec<(PartitionKey, i64)> = vec![
            ("z".into(), 0),
            ("a".into(), 1),
            ("b".into(), 1),
            ("c".into(), 1),
            ("a".into(), 2),
            ("b".into(), 2),
            ("c".into(), 2),
        ];
        assert_eq!(observed, expected);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_e2e_concurrent_producers_keep_per_key_order() {
        let handler = CapturingHandler::new();
        let seen = Arc::clone(&handler.seen);
        let overlaps = Arc::clone(&handler.overlaps);

        let ctx = NodeContext::new("order_node");
        let dispatcher = Arc::new(FairDispatcher::initialize(handler, &ctx).await.unwrap());

        let mut producers = Vec::new();
        for key in ["a", "b", "c", "d", "e"] {
            let dispatcher = Arc::clone(&dispatcher);
            producers.push(tokio::spawn(async move {
                for seq in 0..20 {
                    dispatcher.submit(record(key, seq)).unwrap();
                    if seq % 7 == 0 {
                        tokio::task::yield_now().await;
                    }
                }
            }));
        }
        for producer in producers {
            producer.await.unwrap();
        }

        while seen.lock().unwrap().len() < 100 {
            sleep(Duration::from_millis(5)).await;
        }

        let observed = seen.lock().unwrap().clone();
        for key in ["a", "b", "c", "d", "e"] {
            let key = PartitionKey::from(key);
            let seqs: Vec<i64> = observed
                .iter()
                .filter(|(k, _)| *k == key)
                .map(|(_, seq)| *seq)
                .collect();
            assert_eq!(seqs, (0..20).collect::<Vec<_>>(), "per-key FIFO broken");
        }
        assert_eq!(overlaps.load(Ordering::SeqCst), 0, "process() overlapped");

        let dispatcher = Arc::into_inner(dispatcher).expect("producers still hold the dispatcher");
        dispatcher.teardown().await.unwrap();
    }

    #[tokio::test]
    async fn test_e2e_completion_and_schema_passthrough() {
        let mut handler = CapturingHandler::new();
        handler.completion_capable = true;
        let completions = Arc::clone(&handler.completions);

        let ctx = NodeContext::new("completion_node");
        let dispatcher = FairDispatcher::initialize(handler, &ctx).await.unwrap();

        assert_eq!(
            dispatcher.output_schema().await,
            OutputSchema::single(["word", "count"])
        );

        dispatcher.submit(record("a", 1)).unwrap();
        dispatcher.on_completed(&RequestId::from("req-7")).await;
        dispatcher.teardown().await.unwrap();

        assert_eq!(
            completions.lock().unwrap().clone(),
            vec![RequestId::from("req-7")]
        );
    }
}

#[cfg(test)]
mod observability_tests {
    use observability::{
        init_with_config, record_active_keys, record_dispatch_failure, record_queue_depth,
        record_record_dispatched, record_record_rejected, record_record_submitted,
        record_request_completed, LogFormat, ObservabilityConfig,
    };

    /// Recording must be safe whether or not an exporter is installed.
    #[test]
    fn test_init_and_record_smoke() {
        let config = ObservabilityConfig {
            log_format: LogFormat::Compact,
            metrics_port: None,
            default_log_level: "warn".to_string(),
        };
        init_with_config(config).unwrap();

        record_record_submitted("node_1");
        record_record_dispatched("node_1", 3);
        record_record_rejected("node_1");
        record_dispatch_failure("node_1");
        record_queue_depth("node_1", 2);
        record_active_keys("node_1", 1);
        record_request_completed("node_1");
    }
}
