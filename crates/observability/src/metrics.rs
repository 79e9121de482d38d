//! Dispatch metric recording
//!
//! Prometheus gauges and counters for the fair-dispatch pipeline, labeled
//! by node. Partition keys are deliberately not used as labels: key
//! cardinality is unbounded, node cardinality is fixed by the topology.

use metrics::{counter, gauge};

/// Record a record accepted by submit()
pub fn record_record_submitted(node: &str) {
    counter!(
        "fair_dispatch_records_submitted_total",
        "node" => node.to_string()
    )
    .increment(1);
}

/// Record a record handed to the delegate handler
pub fn record_record_dispatched(node: &str, queue_depth: usize) {
    counter!(
        "fair_dispatch_records_dispatched_total",
        "node" => node.to_string()
    )
    .increment(1);
    gauge!(
        "fair_dispatch_queue_depth",
        "node" => node.to_string()
    )
    .set(queue_depth as f64);
}

/// Record a record rejected at submit() (key projection or terminated)
pub fn record_record_rejected(node: &str) {
    counter!(
        "fair_dispatch_records_rejected_total",
        "node" => node.to_string()
    )
    .increment(1);
}

/// Record a handler processing failure
pub fn record_dispatch_failure(node: &str) {
    counter!(
        "fair_dispatch_failures_total",
        "node" => node.to_string()
    )
    .increment(1);
}

/// Record the current queue depth
pub fn record_queue_depth(node: &str, depth: usize) {
    gauge!(
        "fair_dispatch_queue_depth",
        "node" => node.to_string()
    )
    .set(depth as f64);
}

/// Record the number of keys currently holding pending records
pub fn record_active_keys(node: &str, count: usize) {
    gauge!(
        "fair_dispatch_active_keys",
        "node" => node.to_string()
    )
    .set(count as f64);
}

/// Record a request-completion notification forwarded to the handler
pub fn record_request_completed(node: &str) {
    counter!(
        "fair_dispatch_requests_completed_total",
        "node" => node.to_string()
    )
    .increment(1);
}
