//! Cluster Module
//!
//! Logical cluster membership for the cache simulation. Nodes are tracked
//! in-process only; sync refreshes timestamps and never moves data.

mod manager;
mod node;

// Re-export public types
pub use manager::{NodeManager, NodeSyncReport, SyncOutcome};
pub use node::{CacheNode, NodeSpec, NodeStatus, PRIMARY_NODE_ID};
