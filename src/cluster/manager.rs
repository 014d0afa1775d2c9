//! Node Manager Module
//!
//! Tracks logical cluster membership. There is no data replication here:
//! "sync" only refreshes per-node timestamps, as a stand-in for a real
//! coordination protocol.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::cache::current_timestamp_ms;
use crate::cluster::node::{CacheNode, NodeSpec, NodeStatus, PRIMARY_NODE_ID};
use crate::error::{CacheError, Result};

// == Sync Outcome ==
/// Per-node result of a cluster sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncOutcome {
    /// Active node, `last_sync` refreshed
    Synced,
    /// The primary node, which never syncs against itself
    Skipped,
    /// Inactive node, left untouched
    Unreachable,
}

/// One entry of the sync report returned by [`NodeManager::sync_nodes`].
#[derive(Debug, Clone, Serialize)]
pub struct NodeSyncReport {
    pub node_id: String,
    pub outcome: SyncOutcome,
}

// == Node Manager ==
/// Maintains the cluster membership map, keyed by node id so uniqueness is
/// enforced on insert.
#[derive(Debug)]
pub struct NodeManager {
    nodes: HashMap<String, CacheNode>,
}

impl NodeManager {
    // == Constructor ==
    /// Creates a new NodeManager seeded with the primary node.
    pub fn new() -> Self {
        let primary = CacheNode::primary();
        let mut nodes = HashMap::new();
        nodes.insert(primary.id.clone(), primary);

        Self { nodes }
    }

    // == Add Node ==
    /// Adds a node to the cluster with `last_sync` set to now.
    ///
    /// Rejects an empty id with `InvalidRequest` and an already-registered
    /// id with `DuplicateNode`.
    pub fn add_node(&mut self, spec: NodeSpec) -> Result<()> {
        if spec.id.is_empty() {
            return Err(CacheError::InvalidRequest(
                "Node id cannot be empty".to_string(),
            ));
        }
        if self.nodes.contains_key(&spec.id) {
            return Err(CacheError::DuplicateNode(spec.id));
        }

        let node = CacheNode::from_spec(spec);
        info!(id = %node.id, name = %node.name, "node added to cluster");
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    // == Remove Node ==
    /// Removes a node by id. Returns true iff the node existed.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let removed = self.nodes.remove(id).is_some();
        if removed {
            info!(id, "node removed from cluster");
        }
        removed
    }

    // == Get Nodes ==
    /// Returns a defensive copy of all nodes, ordered by descending priority
    /// then id.
    pub fn get_nodes(&self) -> Vec<CacheNode> {
        let mut nodes: Vec<CacheNode> = self.nodes.values().cloned().collect();
        nodes.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.id.cmp(&b.id)));
        nodes
    }

    /// Looks up a single node by id, returning a copy.
    pub fn get_node(&self, id: &str) -> Option<CacheNode> {
        self.nodes.get(id).cloned()
    }

    // == Simulate Node Failure ==
    /// Marks a node inactive. Returns whether the node was found.
    pub fn simulate_node_failure(&mut self, id: &str) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.status = NodeStatus::Inactive;
                info!(id, "node marked inactive");
                true
            }
            None => false,
        }
    }

    // == Recover Node ==
    /// Brings an inactive node back to active, refreshing `last_sync`.
    ///
    /// Returns true only if the node exists and is currently inactive; an
    /// already-active node is a no-op returning false.
    pub fn recover_node(&mut self, id: &str) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) if node.status == NodeStatus::Inactive => {
                node.status = NodeStatus::Active;
                node.last_sync = current_timestamp_ms();
                info!(id, "node recovered to active");
                true
            }
            _ => false,
        }
    }

    // == Sync Nodes ==
    /// Runs a logical sync pass over the cluster.
    ///
    /// Every active non-primary node gets `last_sync` refreshed and reports
    /// `Synced`; the primary reports `Skipped`; inactive nodes report
    /// `Unreachable` and are left untouched. The report is ordered like
    /// `get_nodes`.
    pub fn sync_nodes(&mut self) -> Vec<NodeSyncReport> {
        let now = current_timestamp_ms();
        let mut report: Vec<(i32, NodeSyncReport)> = Vec::with_capacity(self.nodes.len());

        for node in self.nodes.values_mut() {
            let outcome = if node.id == PRIMARY_NODE_ID {
                SyncOutcome::Skipped
            } else if node.status == NodeStatus::Active {
                node.last_sync = now;
                SyncOutcome::Synced
            } else {
                SyncOutcome::Unreachable
            };

            report.push((
                node.priority,
                NodeSyncReport {
                    node_id: node.id.clone(),
                    outcome,
                },
            ));
        }

        report.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.node_id.cmp(&b.1.node_id)));
        debug!(nodes = report.len(), "cluster sync completed");
        report.into_iter().map(|(_, entry)| entry).collect()
    }

    // == Length ==
    /// Returns the number of cluster members.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the cluster has no members.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for NodeManager {
    fn default() -> Self {
        Self::new()
    }
}
