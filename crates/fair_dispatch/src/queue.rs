//! FairQueue - keyed round-robin record queue
//!
//! Many producers, one consumer. FIFO within a key, strict round-robin
//! across keys.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use tokio::sync::Notify;

use contracts::{PartitionKey, Record};

use crate::error::DispatchError;

/// Queue state guarded by one lock.
///
/// Invariant: `rotation` lists exactly the keys whose queue in `pending`
/// is non-empty, in service order.
#[derive(Default)]
struct QueueState {
    /// Pending records per key, FIFO
    pending: HashMap<PartitionKey, VecDeque<Record>>,
    /// Keys with pending records, head is served next
    rotation: VecDeque<PartitionKey>,
    /// Set on close; take() reports cancellation, add() rejects
    closed: bool,
}

impl QueueState {
    /// Pop the head record of the key at the rotation head.
    ///
    /// A key with records left re-enters at the rotation tail; a drained
    /// key's per-key queue is deleted.
    fn pop_next(&mut self) -> Option<(PartitionKey, Record)> {
        let key = self.rotation.pop_front()?;
        // rotation only lists keys with a pending queue
        let Entry::Occupied(mut entry) = self.pending.entry(key) else {
            return None;
        };
        let Some(record) = entry.get_mut().pop_front() else {
            entry.remove();
            return None;
        };
        if entry.get().is_empty() {
            let (key, _) = entry.remove_entry();
            Some((key, record))
        } else {
            let key = entry.key().clone();
            self.rotation.push_back(key.clone());
            Some((key, record))
        }
    }

    fn depth(&self) -> usize {
        self.pending.values().map(VecDeque::len).sum()
    }
}

/// Multi-producer, single-consumer queue with per-key FIFO order and
/// strict round-robin service across keys.
///
/// All shared state sits behind one mutex covering both the per-key
/// queues and the rotation; the lock is never held across an await.
pub struct FairQueue {
    state: Mutex<QueueState>,
    /// Wakes the parked consumer on arrival or close
    notify: Notify,
}

impl FairQueue {
    /// Create an empty open queue.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState::default()),
            notify: Notify::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().expect("fair queue lock poisoned")
    }

    /// Append a record to its key's queue.
    ///
    /// A newly active key joins the rotation tail. Never blocks; wakes
    /// the consumer when the queue was idle.
    ///
    /// # Errors
    /// Rejects the record with [`DispatchError::Terminated`] once the
    /// queue is closed.
    pub fn add(&self, key: PartitionKey, record: Record) -> Result<(), DispatchError> {
        let mut state = self.lock();
        if state.closed {
            return Err(DispatchError::Terminated { key });
        }

        let was_idle = state.rotation.is_empty();
        let QueueState {
            pending, rotation, ..
        } = &mut *state;
        match pending.entry(key) {
            Entry::Occupied(mut entry) => entry.get_mut().push_back(record),
            Entry::Vacant(entry) => {
                rotation.push_back(entry.key().clone());
                entry.insert(VecDeque::from([record]));
            }
        }
        drop(state);

        if was_idle {
            self.notify.notify_one();
        }
        Ok(())
    }

    /// Take the next record in rotation along with its key, suspending
    /// while the queue is empty. Single logical consumer.
    ///
    /// Returns `None` once the queue has been closed - cancellation, not
    /// an error.
    pub async fn take(&self) -> Option<(PartitionKey, Record)> {
        loop {
            {
                let mut state = self.lock();
                if state.closed {
                    return None;
                }
                if let Some(served) = state.pop_next() {
                    return Some(served);
                }
            }
            self.notify.notified().await;
        }
    }

    /// Close the queue: a parked [`take`](Self::take) unblocks promptly
    /// and later [`add`](Self::add) calls are rejected.
    ///
    /// Returns the number of records abandoned, so callers can report
    /// them instead of dropping them silently.
    pub fn close(&self) -> usize {
        let mut state = self.lock();
        state.closed = true;
        let abandoned = state.depth();
        state.pending.clear();
        state.rotation.clear();
        drop(state);

        self.notify.notify_one();
        abandoned
    }

    /// Total records currently queued across all keys.
    pub fn depth(&self) -> usize {
        self.lock().depth()
    }

    /// Number of keys currently holding pending records.
    pub fn active_keys(&self) -> usize {
        self.lock().rotation.len()
    }

    /// Whether no records are pending.
    pub fn is_empty(&self) -> bool {
        self.lock().rotation.is_empty()
    }
}

impl Default for FairQueue {
    fn default() -> Self {
        Self::new()
    }
}
