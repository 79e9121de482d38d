//! Record - unit of work flowing between nodes
//!
//! Keyed record structure plus the request-completion identifier.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::{PartitionKey, StreamError};

/// Keyed record handed to a node.
///
/// Field 0 of `values` is the partition key; this projection is fixed.
/// The dispatch core never looks past the key and never mutates a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Coordination request this record belongs to (if the hosting
    /// topology tracks request completion)
    pub request_id: Option<RequestId>,

    /// Declared field values; field 0 carries the partition key
    pub values: Vec<serde_json::Value>,

    /// Opaque payload (zero-copy)
    #[serde(default)]
    pub payload: Bytes,
}

impl Record {
    /// Create a record from its declared field values.
    pub fn new(values: Vec<serde_json::Value>) -> Self {
        Self {
            request_id: None,
            values,
            payload: Bytes::new(),
        }
    }

    /// Attach a request id for completion tracking.
    pub fn with_request_id(mut self, request_id: impl Into<RequestId>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Attach an opaque payload.
    pub fn with_payload(mut self, payload: Bytes) -> Self {
        self.payload = payload;
        self
    }

    /// Project the partition key: field 0, which must be a scalar.
    ///
    /// # Errors
    /// Returns a key-projection error when the record has no fields or
    /// field 0 is not a scalar; such a record must not be enqueued.
    pub fn partition_key(&self) -> Result<PartitionKey, StreamError> {
        let value = self.values.first().ok_or(StreamError::KeyMissing)?;
        PartitionKey::from_field(0, value)
    }
}

/// Identifier of a coordination request spanning many records.
///
/// Opaque to the dispatch core; it is only carried through to handlers
/// that consume completion notifications. Uses `Arc<str>` internally so
/// cloning only increments a reference count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(Arc<str>);

impl RequestId {
    /// Get the underlying string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RequestId {
    #[inline]
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for RequestId {
    #[inline]
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Serde support
impl Serialize for RequestId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RequestId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s))
    }
}
