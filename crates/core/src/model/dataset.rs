use serde::{Deserialize, Serialize};

use super::{Graph, MetricRecord};

/// A loaded dataset: the call graph plus the flat metric records measured
/// against it. This is the unit the tree-table view consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileData {
    pub graph: Graph,
    pub records: Vec<MetricRecord>,
}

impl ProfileData {
    pub fn new(graph: Graph, records: Vec<MetricRecord>) -> Self {
        Self { graph, records }
    }

    /// Distinct profile ids present in the records, in first-seen order.
    pub fn profile_ids(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for record in &self.records {
            if let Some(id) = record.profile_id()
                && !seen.contains(&id)
            {
                seen.push(id);
            }
        }
        seen
    }
}
