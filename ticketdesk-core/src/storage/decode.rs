//! Lossy decoding of persisted record collections
//!
//! A collection slot is expected to hold a JSON array. Decoding is
//! deliberately lossy: entries that do not form a valid record are
//! dropped and counted, so callers only ever see well-formed records.
//! An absent slot is an empty collection.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::error::PersistenceError;

/// The slot held something other than a JSON array
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("collection is not valid JSON")]
    Malformed(#[from] serde_json::Error),
    #[error("collection holds a JSON {found}, expected an array")]
    NotAnArray { found: &'static str },
}

/// Records that survived decoding
#[derive(Debug)]
pub struct Decoded<T> {
    pub records: Vec<T>,
    /// Number of array entries that were dropped
    pub discarded: usize,
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode a collection slot, keeping the entries `decode` accepts
pub fn decode_records<T, F>(raw: Option<&[u8]>, decode: F) -> Result<Decoded<T>, DecodeError>
where
    F: Fn(Value) -> Option<T>,
{
    let Some(raw) = raw else {
        return Ok(Decoded {
            records: Vec::new(),
            discarded: 0,
        });
    };

    let entries = match serde_json::from_slice::<Value>(raw)? {
        Value::Array(entries) => entries,
        other => {
            return Err(DecodeError::NotAnArray {
                found: json_kind(&other),
            })
        }
    };

    let total = entries.len();
    let records: Vec<T> = entries.into_iter().filter_map(decode).collect();
    let discarded = total - records.len();

    Ok(Decoded { records, discarded })
}

/// Encode a whole collection for writing back to its slot
pub fn encode_records<T: Serialize>(key: &str, records: &[T]) -> Result<Vec<u8>, PersistenceError> {
    serde_json::to_vec(records).map_err(|source| PersistenceError::Encode {
        key: key.to_string(),
        source,
    })
}
