use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Node identifier within a call graph. Ids arrive as arbitrary JSON object
/// keys, so they are plain strings.
pub type NodeId = String;

/// Row assignment produced by the indented-tree layout: `order` is the
/// vertical row position in a depth-first pre-order listing, `depth` the
/// indentation level (distance from the node's root).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSlot {
    pub order: u32,
    pub depth: u32,
}

/// A single call-graph node. An empty `parents` list marks a root; more than
/// one parent means the node is shared across branches (the graph is a DAG,
/// not strictly a tree).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphNode {
    #[serde(default)]
    pub parents: Vec<NodeId>,
    #[serde(default)]
    pub children: Vec<NodeId>,
    /// Populated by the layout engine; `None` until laid out, and stays
    /// `None` for nodes unreachable from any root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<RowSlot>,
}

/// A call graph keyed by node id.
///
/// `BTreeMap` gives a deterministic iteration order (sorted by id), which
/// fixes the order in which disconnected roots are laid out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Graph {
    pub nodes: BTreeMap<NodeId, GraphNode>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphIntegrityError {
    #[error("node `{node}` lists unknown child `{child}`")]
    DanglingChild { node: NodeId, child: NodeId },
    #[error("node `{node}` lists unknown parent `{parent}`")]
    DanglingParent { node: NodeId, parent: NodeId },
}

impl Graph {
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
        }
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All root ids (no parents), in graph iteration order. A forest may
    /// have zero, one, or many.
    pub fn roots(&self) -> Vec<&NodeId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.parents.is_empty())
            .map(|(id, _)| id)
            .collect()
    }

    /// The canonical root when a single one is required: a node with no
    /// parents and at least one child. `None` when no such node exists.
    pub fn canonical_root(&self) -> Option<&NodeId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.parents.is_empty() && !n.children.is_empty())
            .map(|(id, _)| id)
    }

    /// Verify that every referenced parent/child id exists as a key.
    ///
    /// A dangling reference is a malformed input, reported eagerly instead
    /// of surfacing later as a missing node mid-traversal.
    pub fn check_integrity(&self) -> Result<(), GraphIntegrityError> {
        for (id, node) in &self.nodes {
            for child in &node.children {
                if !self.nodes.contains_key(child) {
                    return Err(GraphIntegrityError::DanglingChild {
                        node: id.clone(),
                        child: child.clone(),
                    });
                }
            }
            for parent in &node.parents {
                if !self.nodes.contains_key(parent) {
                    return Err(GraphIntegrityError::DanglingParent {
                        node: id.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(parents: &[&str], children: &[&str]) -> GraphNode {
        GraphNode {
            parents: parents.iter().map(ToString::to_string).collect(),
            children: children.iter().map(ToString::to_string).collect(),
            layout: None,
        }
    }

    #[test]
    fn canonical_root_needs_children() {
        let mut graph = Graph::new();
        graph.nodes.insert("lone".into(), node(&[], &[]));
        assert_eq!(graph.canonical_root(), None);

        graph.nodes.insert("root".into(), node(&[], &["leaf"]));
        graph.nodes.insert("leaf".into(), node(&["root"], &[]));
        assert_eq!(graph.canonical_root(), Some(&"root".to_string()));
    }

    #[test]
    fn integrity_rejects_dangling_child() {
        let mut graph = Graph::new();
        graph.nodes.insert("root".into(), node(&[], &["ghost"]));
        let err = graph.check_integrity().unwrap_err();
        assert_eq!(
            err,
            GraphIntegrityError::DanglingChild {
                node: "root".into(),
                child: "ghost".into(),
            }
        );
    }

    #[test]
    fn integrity_rejects_dangling_parent() {
        let mut graph = Graph::new();
        graph.nodes.insert("orphan".into(), node(&["ghost"], &[]));
        assert!(matches!(
            graph.check_integrity(),
            Err(GraphIntegrityError::DanglingParent { .. })
        ));
    }

    #[test]
    fn roots_are_sorted_by_id() {
        let mut graph = Graph::new();
        graph.nodes.insert("b".into(), node(&[], &[]));
        graph.nodes.insert("a".into(), node(&[], &[]));
        let roots: Vec<_> = graph.roots().into_iter().map(String::as_str).collect();
        assert_eq!(roots, ["a", "b"]);
    }
}
