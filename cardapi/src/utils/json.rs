//! JSON rendering used by the `Display` impls of the value objects.
//!
//! Values print as `LABEL = {json}` so traces stay greppable. Byte buffers
//! serialize as uppercase hex strings.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::utils::hex::bytes_to_hex;

/// Serialize a value to compact JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string(value)
}

/// Write `label = json` to a formatter.
pub(crate) fn write_labeled<T: Serialize + ?Sized>(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: &T,
) -> fmt::Result {
    let json = to_json(value).map_err(|_| fmt::Error)?;
    write!(f, "{} = {}", label, json)
}

/// `serialize_with` helper: bytes as an uppercase hex string.
pub(crate) fn hex_bytes<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&bytes_to_hex(bytes))
}

/// `serialize_with` helper for optional byte buffers.
pub(crate) fn hex_bytes_opt<S: Serializer>(
    bytes: &Option<Vec<u8>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match bytes {
        Some(bytes) => hex_bytes(bytes, serializer),
        None => serializer.serialize_none(),
    }
}
