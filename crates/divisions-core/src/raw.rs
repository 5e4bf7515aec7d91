// crates/divisions-core/src/raw.rs
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Raw dataset as it comes from JSON.
///
/// ```json
/// { "levels": [
///     { "name": "province", "records": [ { "id": "01", "name": "Thành phố Hà Nội" } ] },
///     { "name": "district", "parent_field": "province_code",
///       "records": [ { "id": "001", "name": "Quận Ba Đình", "province_code": "01" } ] }
/// ] }
/// ```
#[derive(Debug, Deserialize)]
pub struct DatasetRaw {
    pub levels: Vec<LevelRaw>,
}

/// One tier of the raw hierarchy.
#[derive(Debug, Deserialize)]
pub struct LevelRaw {
    pub name: String,
    /// Name of the record field that holds the parent id. Absent for the root level.
    #[serde(default)]
    pub parent_field: Option<String>,
    #[serde(default)]
    pub records: Vec<RecordRaw>,
}

/// Raw record. Everything except `id` and `name` lands in `fields`, which is
/// where the level's parent field is looked up.
#[derive(Debug, Deserialize)]
pub struct RecordRaw {
    pub id: Value,
    pub name: String,
    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
}

/// Ids are strings in most sources, but some exports emit them as numbers.
pub(crate) fn value_to_id(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
