//! Narrow read interface over parsed JSON documents
//!
//! Both input documents are parsed into a [`serde_json::Value`] tree and read
//! only through the helpers here, so every missing or mistyped field is
//! reported with its location (e.g. `testsuites[2].score`).

use crate::error::{GradeError, GradeResult};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Read a file and parse it into a JSON tree
pub fn load(path: &Path) -> GradeResult<Value> {
    let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::InvalidData => GradeError::MalformedDocument {
            path: path.to_path_buf(),
            reason: format!("not valid UTF-8: {}", source),
        },
        _ => GradeError::InputNotFound {
            path: path.to_path_buf(),
            source,
        },
    })?;
    debug!("Read {} bytes from {}", content.len(), path.display());
    parse(&content).map_err(|e| e.at_path(path))
}

/// Parse JSON text into a tree
pub fn parse(text: &str) -> GradeResult<Value> {
    serde_json::from_str(text).map_err(|e| GradeError::malformed(format!("invalid JSON: {}", e)))
}

/// View a node as an object
pub fn object<'a>(node: &'a Value, at: &str) -> GradeResult<&'a Map<String, Value>> {
    node.as_object()
        .ok_or_else(|| GradeError::malformed(locate(at, "expected an object")))
}

/// Look up a required field
pub fn field<'a>(node: &'a Value, key: &str, at: &str) -> GradeResult<&'a Value> {
    object(node, at)?
        .get(key)
        .ok_or_else(|| GradeError::malformed(locate(at, &format!("missing field \"{}\"", key))))
}

/// Look up a required array field
pub fn array<'a>(node: &'a Value, key: &str, at: &str) -> GradeResult<&'a [Value]> {
    field(node, key, at)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| GradeError::malformed(format!("{}: expected an array", join(at, key))))
}

/// Look up a required string field
pub fn string<'a>(node: &'a Value, key: &str, at: &str) -> GradeResult<&'a str> {
    field(node, key, at)?
        .as_str()
        .ok_or_else(|| GradeError::malformed(format!("{}: expected a string", join(at, key))))
}

/// Look up a required numeric field, integer or float
pub fn number(node: &Value, key: &str, at: &str) -> GradeResult<f64> {
    field(node, key, at)?
        .as_f64()
        .ok_or_else(|| GradeError::malformed(format!("{}: expected a number", join(at, key))))
}

/// Whether an object node carries `key`, whatever its value
pub fn has_key(node: &Value, key: &str) -> bool {
    node.as_object().is_some_and(|o| o.contains_key(key))
}

/// Location of element `index` inside the array at `key`
pub fn index(at: &str, key: &str, index: usize) -> String {
    format!("{}[{}]", join(at, key), index)
}

fn locate(at: &str, message: &str) -> String {
    if at.is_empty() {
        message.to_string()
    } else {
        format!("{}: {}", at, message)
    }
}

fn join(at: &str, key: &str) -> String {
    if at.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", at, key)
    }
}
