//! Load loosely-typed test tables from JSON.
//!
//! JSON has no tuples, so every array becomes a `Value::List`. Integers that fit in `i64` stay integers;
//! every other number becomes a float.

use std::fs;
use std::path::Path;

use algoesup_core::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convert a parsed JSON document into a table value.
pub fn value_from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::None,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::Str(s),
        serde_json::Value::Array(items) => Value::List(items.into_iter().map(value_from_json).collect()),
        serde_json::Value::Object(entries) => {
            Value::Dict(entries.into_iter().map(|(k, v)| (k, value_from_json(v))).collect())
        }
    }
}

/// Parse a JSON string into a table value.
pub fn parse_table_json(source: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(source).map(value_from_json)
}

/// Read a JSON file into a table value.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_table(path: &Path) -> Result<Value, LoadError> {
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_table_json(&source).map_err(|source| LoadError::Json {
        path: path.display().to_string(),
        source,
    })
}
