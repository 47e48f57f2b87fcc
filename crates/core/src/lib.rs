//! Core transforms for the tracetable profiler tree-table: indented-tree
//! layout of a call graph plus the aggregation utilities that feed chart
//! scales. Pure in-memory data-to-data transforms; rendering lives elsewhere.

pub mod model;
pub mod parsers;
pub mod views;

pub use model::{Graph, GraphIntegrityError, GraphNode, MetricRecord, NodeId, ProfileData, RowSlot};
pub use views::{Aggregate, GraphLayoutEngine, LayoutError, OrdinalMapping};
