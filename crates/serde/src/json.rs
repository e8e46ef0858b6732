//! One-way JSON export of a store.
//!
//! XML is the persistence format; this export exists for debugging
//! and for handing store contents to external tools. There is no
//! JSON input path.

use chroma_store::{Store, Value};
use serde_json::json;

use crate::error::Result;

/// Converts a store to a JSON value.
///
/// Scalars map to JSON primitives, colors to `[r, g, b, a]` arrays,
/// lists to arrays, nested stores to objects. `no_save` entries are
/// excluded, mirroring the XML form.
pub fn to_json_value(store: &Store) -> serde_json::Value {
    let mut object = serde_json::Map::new();
    for variable in store.iter() {
        if variable.no_save() {
            continue;
        }
        let mut items: Vec<serde_json::Value> =
            variable.values().iter().map(payload_to_json).collect();
        let value = if variable.is_list() {
            serde_json::Value::Array(items)
        } else {
            items.pop().unwrap_or(serde_json::Value::Null)
        };
        object.insert(variable.name().to_string(), value);
    }
    serde_json::Value::Object(object)
}

/// Serializes a store to a JSON string.
pub fn to_json_string(store: &Store) -> Result<String> {
    Ok(serde_json::to_string(&to_json_value(store))?)
}

/// Serializes a store to a pretty-printed JSON string.
pub fn to_json_string_pretty(store: &Store) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_json_value(store))?)
}

fn payload_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Bool(value) => json!(value),
        Value::Int(value) => json!(value),
        Value::Float(value) => json!(value),
        Value::String(value) => json!(value),
        Value::Color(c) => json!([c.red, c.green, c.blue, c.alpha]),
        Value::Store(child) => to_json_value(child),
    }
}
