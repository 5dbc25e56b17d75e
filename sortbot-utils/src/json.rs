use anyhow::{anyhow, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{to_string, to_value, Map, Value};
use std::fs;

pub fn dejsonify<'a, T>(json_str: &'a str) -> serde_json::Result<T>
where
    T: Deserialize<'a>,
{
    serde_json::from_str::<T>(json_str)
}

/// Compact JSON with object keys sorted, so equal values always render the
/// same string.
pub fn jsonify<T>(obj: &T) -> Result<String>
where
    T: Serialize,
{
    Ok(to_string(&jsonify_internal(&to_value(obj)?))?)
}

pub fn jsonify_internal(json_value: &Value) -> Value {
    match json_value {
        Value::Object(obj) => {
            let mut sorted_map = Map::new();
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort();
            for key in keys {
                if let Some(value) = obj.get(key) {
                    sorted_map.insert(key.clone(), jsonify_internal(value));
                }
            }
            Value::Object(sorted_map)
        }
        Value::Array(values) => Value::Array(values.iter().map(jsonify_internal).collect()),
        _ => json_value.clone(),
    }
}

/// Accepts either an inline json string or a path to a `.json` file.
pub fn load_json_or_path<T>(input: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let json = if input.trim_end().ends_with(".json") {
        fs::read_to_string(input.trim())
            .map_err(|e| anyhow!("Failed to read json file {}: {}", input, e))?
    } else {
        input.to_string()
    };
    dejsonify::<T>(&json).map_err(|e| anyhow!("Failed to parse json: {}", e))
}
