//! Canonical `[names, values]` encoding shared by serialization and hashing.

use std::collections::BTreeMap;

use bakery_types::{Cake, CakeKind};
use serde_json::Value;

use crate::error::{RackError, RackResult};

/// Canonical bytes of a rack with no entries.
pub const EMPTY_RACK_BYTES: &[u8] = b"[[],[]]";

/// The folder cake of an empty rack.
pub fn empty_rack_cake() -> Cake {
    Cake::from_bytes(EMPTY_RACK_BYTES, CakeKind::Folder)
}

/// Encode sorted entries as compact JSON with no whitespace.
pub(crate) fn encode(entries: &BTreeMap<String, Option<Cake>>) -> Vec<u8> {
    let names = entries.keys().cloned().map(Value::String).collect();
    let values = entries
        .values()
        .map(|value| match value {
            Some(cake) => Value::String(cake.to_string()),
            None => Value::Null,
        })
        .collect();
    Value::Array(vec![Value::Array(names), Value::Array(values)])
        .to_string()
        .into_bytes()
}

/// Decode the JSON pair into parallel name and value sequences.
///
/// Only the shape and the cake strings are checked here; length and
/// uniqueness are enforced by [`CakeRack::from_parts`](crate::CakeRack::from_parts).
pub(crate) fn decode(bytes: &[u8]) -> RackResult<(Vec<String>, Vec<Option<Cake>>)> {
    let (names, values): (Vec<String>, Vec<Option<String>>) =
        serde_json::from_slice(bytes).map_err(|e| RackError::Encoding(e.to_string()))?;
    let values = values
        .iter()
        .map(|value| value.as_deref().map(Cake::parse).transpose())
        .collect::<Result<Vec<_>, _>>()?;
    Ok((names, values))
}
