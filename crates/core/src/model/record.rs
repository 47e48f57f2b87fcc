use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A flat metric record: arbitrary named fields, with `profile` and `node`
/// present on profile-attributed measurements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricRecord {
    pub fields: BTreeMap<String, Value>,
}

impl MetricRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Canonical string form of a field, for grouping and domain membership.
    pub fn canon(&self, key: &str) -> Option<String> {
        self.fields.get(key).map(canon_value)
    }

    /// Numeric coercion of a field: JSON numbers directly, numeric strings
    /// via parsing. `None` for anything else.
    pub fn number(&self, key: &str) -> Option<f64> {
        number_of(self.fields.get(key)?)
    }

    pub fn profile_id(&self) -> Option<String> {
        self.canon("profile")
    }

    pub fn node_id(&self) -> Option<String> {
        self.canon("node")
    }
}

/// Canonical string form of a JSON value.
///
/// Ids in loaded data are inconsistently typed (the same id may appear as
/// `3`, `3.0`, or `"3"`), so every comparison site normalizes through this
/// one function instead of relying on coercive equality: integral numbers
/// collapse to integer text, everything else keeps its literal form.
pub fn canon_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(f) = n.as_f64()
                && f.fract() == 0.0
                && f.abs() < 9_007_199_254_740_992.0
            {
                format!("{}", f as i64)
            } else {
                n.to_string()
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Numeric coercion of a JSON value (numbers and numeric strings).
pub fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
