pub mod dataset;
pub mod graph;
pub mod record;

pub use dataset::ProfileData;
pub use graph::{Graph, GraphIntegrityError, GraphNode, NodeId, RowSlot};
pub use record::{MetricRecord, canon_value, number_of};
