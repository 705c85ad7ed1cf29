//! Conversions between Value trees, `serde_json::Value`, and serde types.

use dotkey_core::{Error, Value};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Convert a decoded `serde_json::Value` into a Value tree.
///
/// JSON numbers become `Integer` when they fit `i64`, otherwise `Float`,
/// with a decimal-string fallback for anything larger than both.
pub fn value_from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Value::Integer(i),
            (None, Some(f)) => Value::Float(f),
            (None, None) => Value::String(n.to_string()),
        },
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::Array(items.into_iter().map(value_from_json).collect())
        }
        serde_json::Value::Object(map) => Value::Map(
            map.into_iter()
                .map(|(key, item)| (key, value_from_json(item)))
                .collect(),
        ),
    }
}

/// Convert a Value tree into a `serde_json::Value` ready for encoding.
///
/// Bytes render as standard base64 (JSON has no binary type); non-finite
/// floats render as null.
pub fn value_into_json(value: Value) -> serde_json::Value {
    use base64::Engine;

    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(b),
        Value::Integer(i) => serde_json::Value::Number(i.into()),
        Value::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s),
        Value::Bytes(b) => serde_json::Value::String(
            base64::engine::general_purpose::STANDARD.encode(&b),
        ),
        Value::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(value_into_json).collect())
        }
        Value::Map(map) => serde_json::Value::Object(
            map.into_iter()
                .map(|(key, item)| (key, value_into_json(item)))
                .collect(),
        ),
    }
}

/// Convert any serializable Rust type to a Value tree.
pub fn to_value<T: Serialize>(data: &T) -> Result<Value, Error> {
    let json = serde_json::to_value(data).map_err(|e| Error::encode(e.to_string()))?;
    Ok(value_from_json(json))
}

/// Convert a Value tree to a deserializable Rust type.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    serde_json::from_value(value_into_json(value)).map_err(|e| Error::decode(e.to_string()))
}
