//! NodeContext - execution context handed to a node at initialization

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Execution context for one node instance.
///
/// Carries the node's identity within the topology plus the
/// topology-level configuration map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeContext {
    /// Node ID within the topology
    pub node_id: String,

    /// Task index of this node instance (parallel nodes share a node_id)
    pub task_index: u32,

    /// Topology-level configuration
    #[serde(default)]
    pub conf: HashMap<String, serde_json::Value>,
}

impl NodeContext {
    /// Create a context for a single-task node with empty configuration.
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            task_index: 0,
            conf: HashMap::new(),
        }
    }

    /// Look up a configuration value.
    pub fn conf_get(&self, key: &str) -> Option<&serde_json::Value> {
        self.conf.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conf_defaults_empty_on_deserialize() {
        let ctx: NodeContext =
            serde_json::from_str(r#"{"node_id": "n1", "task_index": 2}"#).unwrap();
        assert_eq!(ctx.node_id, "n1");
        assert_eq!(ctx.task_index, 2);
        assert!(ctx.conf.is_empty());
    }

    #[test]
    fn test_conf_lookup() {
        let mut ctx = NodeContext::new("n1");
        ctx.conf
            .insert("max.pending".to_string(), serde_json::json!(128));
        assert_eq!(ctx.conf_get("max.pending"), Some(&serde_json::json!(128)));
        assert_eq!(ctx.conf_get("missing"), None);
    }
}
