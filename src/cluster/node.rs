//! Cluster Node Module
//!
//! Defines the logical cluster member type. Nodes carry no real network
//! identity; the url is an opaque address that is never dialed.

use serde::{Deserialize, Serialize};

use crate::cache::current_timestamp_ms;

/// Id of the node seeded at cluster construction.
pub const PRIMARY_NODE_ID: &str = "primary";

// == Node Status ==
/// Lifecycle state of a cluster node.
///
/// The only transitions are `Active -> Inactive` via a simulated failure and
/// `Inactive -> Active` via recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Active,
    Inactive,
}

impl Default for NodeStatus {
    fn default() -> Self {
        NodeStatus::Active
    }
}

// == Cache Node ==
/// A logical member of the simulated cache cluster.
#[derive(Debug, Clone, Serialize)]
pub struct CacheNode {
    /// Unique node identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Opaque address, never dialed
    pub url: String,
    /// Current lifecycle state
    pub status: NodeStatus,
    /// Ordering hint for cluster listings (higher first)
    pub priority: i32,
    /// Last logical sync timestamp (Unix milliseconds)
    pub last_sync: u64,
}

// == Node Spec ==
/// Caller-supplied description of a node to add; `last_sync` is assigned by
/// the cluster on insertion.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub status: NodeStatus,
    pub priority: i32,
}

impl CacheNode {
    /// Creates a node from a spec, stamping `last_sync` with the current time.
    pub fn from_spec(spec: NodeSpec) -> Self {
        Self {
            id: spec.id,
            name: spec.name,
            url: spec.url,
            status: spec.status,
            priority: spec.priority,
            last_sync: current_timestamp_ms(),
        }
    }

    /// Creates the primary node seeded at cluster construction.
    pub fn primary() -> Self {
        Self {
            id: PRIMARY_NODE_ID.to_string(),
            name: "Primary Node".to_string(),
            url: "localhost".to_string(),
            status: NodeStatus::Active,
            priority: 100,
            last_sync: current_timestamp_ms(),
        }
    }
}
