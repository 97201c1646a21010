use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::errors::{KinshipError, Result};
use crate::types::PersonRecord;

/// Parses a member collection from JSON text.
///
/// Accepts an array of person objects, or an object mapping id to person
/// object. In the keyed form a record without an `id` field takes its key
/// (as a string id); keyed members come back ordered by key.
pub fn parse_members(json: &str) -> Result<Vec<PersonRecord>> {
    let value: Value = serde_json::from_str(json)?;
    members_from_value(value)
}

/// Reads and parses a member collection from a JSON file.
pub fn load_members(path: &Path) -> Result<Vec<PersonRecord>> {
    let contents = fs::read_to_string(path).map_err(|e| KinshipError::Input {
        message: format!("failed to read member file '{}': {}", path.display(), e),
    })?;
    parse_members(&contents)
}

/// Converts an already-parsed JSON document into member records.
pub fn members_from_value(value: Value) -> Result<Vec<PersonRecord>> {
    match value {
        Value::Array(items) => Ok(serde_json::from_value(Value::Array(items))?),
        Value::Object(map) => map.into_iter().map(keyed_member).collect(),
        other => Err(KinshipError::Input {
            message: format!(
                "expected an array or object of members, found {}",
                json_kind(&other)
            ),
        }),
    }
}

fn keyed_member((key, entry): (String, Value)) -> Result<PersonRecord> {
    match entry {
        Value::Object(mut fields) => {
            fields.entry("id").or_insert(Value::String(key));
            Ok(serde_json::from_value(Value::Object(fields))?)
        }
        other => Err(KinshipError::Input {
            message: format!("member '{}' is not an object: {}", key, other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
