//! FairDispatcher - node-facing facade over the fair queue and worker

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, trace, warn};

use contracts::{NodeContext, OutputSchema, Record, RecordHandler, RequestId};

use crate::error::DispatchError;
use crate::metrics::{DispatchMetrics, MetricsSnapshot};
use crate::queue::FairQueue;
use crate::worker::dispatch_worker;

/// Fair dispatch wrapper around a delegate handler.
///
/// Producers call [`submit`](Self::submit) concurrently; one background
/// worker drains the queue in key-fair order and feeds the handler one
/// record at a time. The handler sits behind a single mutex, so the
/// worker and the pass-through calls
/// ([`on_completed`](Self::on_completed),
/// [`output_schema`](Self::output_schema), teardown) never reach it
/// concurrently.
///
/// Lifecycle: [`initialize`](Self::initialize) -> running ->
/// [`teardown`](Self::teardown). Teardown consumes the dispatcher, so
/// submitting afterwards is rejected at compile time; producer clones
/// racing a teardown get [`DispatchError::Terminated`].
pub struct FairDispatcher<H: RecordHandler + Send + 'static> {
    node: String,
    queue: Arc<FairQueue>,
    handler: Arc<Mutex<H>>,
    metrics: Arc<DispatchMetrics>,
    /// Probed once at initialization
    completion_capable: bool,
    worker: JoinHandle<Result<(), DispatchError>>,
}

impl<H: RecordHandler + Send + 'static> FairDispatcher<H> {
    /// Initialize the delegate handler, then start the dispatch worker.
    ///
    /// The handler is fully initialized before the first record can
    /// reach it.
    #[instrument(
        name = "fair_dispatcher_initialize",
        skip(handler, ctx),
        fields(node = %ctx.node_id)
    )]
    pub async fn initialize(mut handler: H, ctx: &NodeContext) -> Result<Self, DispatchError> {
        handler.init(ctx).await?;
        let completion_capable = handler.handles_completion();
        info!(
            node = %ctx.node_id,
            handler = handler.name(),
            completion_capable,
            "fair dispatcher initialized"
        );

        let queue = Arc::new(FairQueue::new());
        let metrics = Arc::new(DispatchMetrics::new());
        let handler = Arc::new(Mutex::new(handler));
        let worker = tokio::spawn(dispatch_worker(
            Arc::clone(&queue),
            Arc::clone(&handler),
            Arc::clone(&metrics),
            ctx.node_id.clone(),
        ));

        Ok(Self {
            node: ctx.node_id.clone(),
            queue,
            handler,
            metrics,
            completion_capable,
            worker,
        })
    }

    /// Enqueue a record for fair dispatch. Never blocks.
    ///
    /// The partition key is field 0 of the record's values; nothing else
    /// of the payload is inspected.
    ///
    /// # Errors
    /// Key-projection failures are reported synchronously and the record
    /// is not enqueued. Once the dispatcher has terminated (teardown or
    /// handler failure), records are rejected with
    /// [`DispatchError::Terminated`].
    pub fn submit(&self, record: Record) -> Result<(), DispatchError> {
        let key = match record.partition_key() {
            Ok(key) => key,
            Err(e) => {
                self.metrics.inc_rejected_count();
                warn!(node = %self.node, error = %e, "record rejected: key projection failed");
                return Err(DispatchError::Contract(e));
            }
        };

        if let Err(e) = self.queue.add(key, record) {
            self.metrics.inc_rejected_count();
            return Err(e);
        }
        self.metrics.inc_submitted_count();
        self.metrics.set_queue_depth(self.queue.depth());
        self.metrics.set_active_keys(self.queue.active_keys());
        Ok(())
    }

    /// Stop the worker and tear down the handler. Best-effort: records
    /// still queued are abandoned (counted in the logs), not drained.
    ///
    /// A handler failure that stopped the worker earlier is surfaced
    /// here.
    #[instrument(name = "fair_dispatcher_teardown", skip(self), fields(node = %self.node))]
    pub async fn teardown(self) -> Result<(), DispatchError> {
        let abandoned = self.queue.close();
        if abandoned > 0 {
            warn!(node = %self.node, abandoned, "tearing down with records still queued");
        }

        let worker_result = match self.worker.await {
            Ok(result) => result,
            Err(e) => {
                error!(node = %self.node, error = ?e, "dispatch worker task panicked");
                Err(DispatchError::worker(e.to_string()))
            }
        };

        let teardown_result = self
            .handler
            .lock()
            .await
            .teardown()
            .await
            .map_err(DispatchError::from);

        info!(node = %self.node, "fair dispatcher terminated");
        worker_result.and(teardown_result)
    }

    /// Declared output fields of the delegate handler.
    pub async fn output_schema(&self) -> OutputSchema {
        self.handler.lock().await.output_schema()
    }

    /// Forward a request-completion notification to the handler.
    ///
    /// No-op when the handler does not consume completions (capability
    /// probed once at initialization).
    pub async fn on_completed(&self, request_id: &RequestId) {
        if !self.completion_capable {
            trace!(
                node = %self.node,
                request_id = %request_id,
                "completion dropped: handler has no completion capability"
            );
            return;
        }
        self.handler.lock().await.on_completed(request_id);
    }

    /// Node ID this dispatcher serves.
    pub fn node(&self) -> &str {
        &self.node
    }

    /// Get current metrics
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
