//! Dispatch worker - sole consumer of the fair queue

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, instrument};

use contracts::RecordHandler;

use crate::error::DispatchError;
use crate::metrics::DispatchMetrics;
use crate::queue::FairQueue;

/// Worker loop draining the queue into the handler, one record at a time.
///
/// Ends cleanly when the queue closes. A processing error terminates the
/// loop: the queue is closed, remaining records are counted and reported,
/// and the error is returned for the teardown path to surface.
#[instrument(
    name = "dispatch_worker_loop",
    skip(queue, handler, metrics, node),
    fields(node = %node)
)]
pub(crate) async fn dispatch_worker<H: RecordHandler + Send + 'static>(
    queue: Arc<FairQueue>,
    handler: Arc<Mutex<H>>,
    metrics: Arc<DispatchMetrics>,
    node: String,
) -> Result<(), DispatchError> {
    debug!(node = %node, "dispatch worker started");

    while let Some((key, record)) = queue.take().await {
        metrics.set_queue_depth(queue.depth());
        metrics.set_active_keys(queue.active_keys());

        let mut guard = handler.lock().await;
        match guard.process(&record).await {
            Ok(()) => {
                metrics.inc_dispatched_count();
            }
            Err(e) => {
                drop(guard);
                metrics.inc_failure_count();
                let abandoned = queue.close();
                error!(
                    node = %node,
                    key = %key,
                    request_id = ?record.request_id,
                    error = %e,
                    abandoned,
                    "record processing failed, dispatch worker stopping"
                );
                return Err(DispatchError::Handler { key, source: e });
            }
        }
    }

    debug!(node = %node, "dispatch queue closed, worker stopping");
    Ok(())
}
