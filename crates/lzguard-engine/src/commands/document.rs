//! Configuration document intake.
//!
//! ## Digests
//!
//! A document digest is the hex-encoded SHA256 of its canonical JSON form:
//! object keys sorted, no insignificant whitespace. Two revisions that differ
//! only in key order or formatting share a digest, matching the diff engine,
//! which also ignores key order.

use lzguard_core::errors::GuardError;
use lzguard_core::{log_op_end, log_op_error, log_op_start};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::Result;

/// Parse raw document bytes.
///
/// ## Errors
///
/// `InvalidDocument` when the bytes are not UTF-8, not JSON, or the root is
/// not an object.
pub fn parse_document(bytes: &[u8]) -> Result<Value> {
    log_op_start!("parse_document", size_bytes = bytes.len());
    let start = std::time::Instant::now();

    let document = parse_document_impl(bytes).map_err(|e| {
        log_op_error!(
            "parse_document",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "parse_document",
        duration_ms = start.elapsed().as_millis() as u64
    );

    Ok(document)
}

fn parse_document_impl(bytes: &[u8]) -> std::result::Result<Value, GuardError> {
    let text = std::str::from_utf8(bytes).map_err(|e| GuardError::InvalidDocument {
        reason: format!("document is not valid UTF-8: {}", e),
    })?;
    let value: Value = serde_json::from_str(text).map_err(|e| GuardError::InvalidDocument {
        reason: format!("document is not valid JSON: {}", e),
    })?;
    if !value.is_object() {
        return Err(GuardError::InvalidDocument {
            reason: "document root must be an object".to_string(),
        });
    }
    Ok(value)
}

/// Hex-encoded SHA256 digest of the canonical form of `document`.
///
/// ## Example
///
/// ```
/// use lzguard_engine::commands::document::document_digest;
/// use serde_json::json;
///
/// let a = document_digest(&json!({"a": 1, "b": 2}));
/// let b = document_digest(&json!({"b": 2, "a": 1}));
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 64);
/// ```
pub fn document_digest(document: &Value) -> String {
    hash_string(&canonical(document).to_string())
}

fn canonical(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::new();
            for key in keys {
                sorted.insert(key.clone(), canonical(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        other => other.clone(),
    }
}

fn hash_string(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}
