//! OutputSchema - declared output fields of a node

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Declared output fields, keyed by stream.
///
/// A node that emits nothing declares an empty schema. The dispatch
/// layer never interprets schemas, it only forwards the delegate's
/// declaration to the hosting framework.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSchema {
    /// Stream name -> field names
    pub streams: HashMap<String, Vec<String>>,
}

impl OutputSchema {
    /// Name of the implicit default stream
    pub const DEFAULT_STREAM: &'static str = "default";

    /// Create an empty schema.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Declare fields on the default stream.
    pub fn single<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut schema = Self::default();
        schema.declare(Self::DEFAULT_STREAM, fields);
        schema
    }

    /// Declare fields on a named stream, replacing any prior declaration.
    pub fn declare<I, S>(&mut self, stream: impl Into<String>, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.streams
            .insert(stream.into(), fields.into_iter().map(Into::into).collect());
    }

    /// Fields of the default stream, if declared.
    pub fn default_stream_fields(&self) -> Option<&[String]> {
        self.streams.get(Self::DEFAULT_STREAM).map(Vec::as_slice)
    }
}
