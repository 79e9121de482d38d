//! PartitionKey - Cheap-to-clone partition identifier
//!
//! String keys use Arc<str> internally for O(1) clone operations.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

use crate::StreamError;

/// Partition identifier extracted from a record.
///
/// Keys group records for fair scheduling: equality and hashing are the
/// only operations the scheduler relies on, no ordering is assumed. The
/// `Str` variant uses `Arc<str>` so cloning only increments a reference
/// count; keys are cloned on every pass through the rotation.
///
/// # Examples
/// ```
/// use contracts::PartitionKey;
///
/// let key: PartitionKey = "tenant_a".into();
/// let key2 = key.clone();  // O(1) - just increments ref count
/// assert_eq!(key, key2);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum PartitionKey {
    /// String key (the common case: tenant ids, request ids)
    Str(Arc<str>),
    /// Integer key
    Int(i64),
    /// Boolean key
    Bool(bool),
}

impl PartitionKey {
    /// Project a key out of a record field value.
    ///
    /// Only scalar kinds qualify: strings, integers, and booleans.
    /// Nulls, floats, arrays, and objects are rejected - they either
    /// lack a total equality or make the grouping meaningless.
    pub fn from_field(index: usize, value: &serde_json::Value) -> Result<Self, StreamError> {
        use serde_json::Value;

        match value {
            Value::String(s) => Ok(Self::Str(Arc::from(s.as_str()))),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .ok_or(StreamError::KeyUnsupported {
                    index,
                    kind: "non-integer number",
                }),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Null => Err(StreamError::KeyUnsupported {
                index,
                kind: "null",
            }),
            Value::Array(_) => Err(StreamError::KeyUnsupported {
                index,
                kind: "array",
            }),
            Value::Object(_) => Err(StreamError::KeyUnsupported {
                index,
                kind: "object",
            }),
        }
    }
}

// Conversions
impl From<&str> for PartitionKey {
    #[inline]
    fn from(s: &str) -> Self {
        Self::Str(Arc::from(s))
    }
}

impl From<String> for PartitionKey {
    #[inline]
    fn from(s: String) -> Self {
        Self::Str(Arc::from(s))
    }
}

impl From<i64> for PartitionKey {
    #[inline]
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for PartitionKey {
    #[inline]
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

// Display and Debug
impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl fmt::Debug for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "PartitionKey({s:?})"),
            Self::Int(i) => write!(f, "PartitionKey({i})"),
            Self::Bool(b) => write!(f, "PartitionKey({b})"),
        }
    }
}

// Serde support - keys serialize as the bare scalar
impl Serialize for PartitionKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Str(s) => serializer.serialize_str(s),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl<'de> Deserialize<'de> for PartitionKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeyVisitor;

        impl serde::de::Visitor<'_> for KeyVisitor {
            type Value = PartitionKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, integer, or boolean partition key")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(PartitionKey::from(v))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(PartitionKey::Int(v))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i64::try_from(v)
                    .map(PartitionKey::Int)
                    .map_err(|_| E::custom("integer key out of range"))
            }

            fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(PartitionKey::Bool(v))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}
