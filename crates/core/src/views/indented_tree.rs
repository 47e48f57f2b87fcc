use std::collections::HashMap;

use thiserror::Error;

use crate::model::{Graph, GraphIntegrityError, NodeId, RowSlot};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("cycle detected through node `{0}`")]
    Cycle(NodeId),
}

/// Lays out a call graph as an indented tree: every root-reachable node gets
/// a row `order` (pre-order position) and a `depth` (indentation level).
///
/// The engine owns a copy of the graph taken at construction, so the
/// caller's graph is never mutated.
#[derive(Debug, Clone)]
pub struct GraphLayoutEngine {
    graph: Graph,
    max_depth: u32,
}

impl GraphLayoutEngine {
    /// Validates referential integrity up front and copies the graph.
    pub fn new(graph: &Graph) -> Result<Self, GraphIntegrityError> {
        graph.check_integrity()?;
        Ok(Self {
            graph: graph.clone(),
            max_depth: 0,
        })
    }

    /// The engine's copy of the graph (annotated after layout).
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Maximum depth seen during the last layout (0 before layout).
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Assign every root-reachable node a dense row order and a depth, and
    /// return the annotated graph copy.
    ///
    /// Roots (nodes with no parents) are laid out consecutively in graph
    /// iteration order; within a root, children are visited pre-order in
    /// child-list order, each sibling subtree starting on the row after the
    /// previous one. A node shared by several parents is laid out once,
    /// under the first path that reaches it; an edge back into a node on
    /// the current path is a cycle and fails. Nodes unreachable from any
    /// root keep `layout = None`.
    pub fn compute_indented_layout(&mut self) -> Result<Graph, LayoutError> {
        let mut slots: HashMap<NodeId, RowSlot> = HashMap::with_capacity(self.graph.len());
        let mut path: Vec<NodeId> = Vec::new();
        self.max_depth = 0;

        let roots: Vec<NodeId> = self.graph.roots().into_iter().cloned().collect();
        let mut cursor = 0;
        for root in roots {
            cursor += self.visit(&root, 0, cursor, &mut slots, &mut path)?;
        }

        for (id, slot) in slots {
            if let Some(node) = self.graph.nodes.get_mut(&id) {
                node.layout = Some(slot);
            }
        }
        Ok(self.graph.clone())
    }

    /// Pre-order visit of `id`'s subtree starting at row `cursor` — returns
    /// the number of rows the subtree consumed so the caller can advance.
    fn visit(
        &mut self,
        id: &NodeId,
        depth: u32,
        cursor: u32,
        slots: &mut HashMap<NodeId, RowSlot>,
        path: &mut Vec<NodeId>,
    ) -> Result<u32, LayoutError> {
        if path.contains(id) {
            return Err(LayoutError::Cycle(id.clone()));
        }
        if slots.contains_key(id) {
            // Shared node already placed via an earlier path; first path wins.
            return Ok(0);
        }

        slots.insert(
            id.clone(),
            RowSlot {
                order: cursor,
                depth,
            },
        );
        self.max_depth = self.max_depth.max(depth);

        // Integrity is checked at construction, so the id always resolves.
        let children = self
            .graph
            .node(id)
            .map(|node| node.children.clone())
            .unwrap_or_default();

        path.push(id.clone());
        let mut consumed = 1;
        for child in &children {
            consumed += self.visit(child, depth + 1, cursor + consumed, slots, path)?;
        }
        path.pop();
        Ok(consumed)
    }
}
