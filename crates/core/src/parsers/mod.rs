use serde::Deserialize;
use thiserror::Error;

use crate::model::{Graph, GraphIntegrityError, MetricRecord, ProfileData};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed graph: {0}")]
    Graph(#[from] GraphIntegrityError),
}

/// Records arrive either as an array or as an object keyed by arbitrary
/// string ids; the keys carry no meaning, so the object form flattens into
/// a sequence.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordCollection {
    Seq(Vec<MetricRecord>),
    Map(std::collections::BTreeMap<String, MetricRecord>),
}

impl RecordCollection {
    fn into_records(self) -> Vec<MetricRecord> {
        match self {
            Self::Seq(records) => records,
            Self::Map(map) => map.into_values().collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawProfileData {
    graph: Graph,
    records: RecordCollection,
}

/// Parse a call-graph JSON object (`{"id": {"parents": [...], "children":
/// [...]}}`) and verify its referential integrity.
pub fn parse_graph(data: &[u8]) -> Result<Graph, LoadError> {
    let graph: Graph = serde_json::from_slice(data)?;
    graph.check_integrity()?;
    Ok(graph)
}

/// Parse a metric-record collection (array or id-keyed object).
pub fn parse_records(data: &[u8]) -> Result<Vec<MetricRecord>, LoadError> {
    let collection: RecordCollection = serde_json::from_slice(data)?;
    Ok(collection.into_records())
}

/// Parse a combined dataset: `{"graph": ..., "records": ...}`.
pub fn parse_profile_data(data: &[u8]) -> Result<ProfileData, LoadError> {
    let raw: RawProfileData = serde_json::from_slice(data)?;
    raw.graph.check_integrity()?;
    Ok(ProfileData::new(raw.graph, raw.records.into_records()))
}
