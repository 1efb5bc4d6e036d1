//! Leaf value codec between the string-only remote store and typed local JSON.
//!
//! Decoding tries JSON first and falls back to the raw string, so `"42"`
//! comes back as the number 42 and `"some-text"` stays a string. Encoding
//! passes strings through untouched and JSON-stringifies everything else.
//!
//! The round trip is lossy for strings that happen to parse as JSON: a local
//! string `"42"` is uploaded as `42` and decodes to the number 42 on the next
//! download. The remote side has no way to tell the two apart, so decoding
//! always prefers the parsed value.

use serde_json::Value;

use crate::tree::Tree;

/// Outcome of decoding a single remote string.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// The string was valid JSON.
    Parsed(Value),
    /// The string was not valid JSON and is kept verbatim.
    Raw(String),
}

impl Decoded {
    pub fn into_value(self) -> Value {
        match self {
            Decoded::Parsed(value) => value,
            Decoded::Raw(raw) => Value::String(raw),
        }
    }
}

pub fn decode(remote: &str) -> Decoded {
    match serde_json::from_str::<Value>(remote) {
        Ok(value) => Decoded::Parsed(value),
        Err(_) => Decoded::Raw(remote.to_string()),
    }
}

/// Decode one remote string into a local value.
pub fn decode_leaf(remote: &str) -> Value {
    decode(remote).into_value()
}

/// Encode one local value as the string the remote store keeps.
pub fn encode_leaf(local: &Value) -> String {
    match local {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Decode every string leaf of a remote tree. Non-string leaves are kept.
pub fn decode_tree(remote: &Tree) -> Tree {
    remote
        .iter()
        .map(|(key, value)| {
            let decoded = match value {
                Value::Object(sub) => Value::Object(decode_tree(sub)),
                Value::String(s) => decode_leaf(s),
                other => other.clone(),
            };
            (key.clone(), decoded)
        })
        .collect()
}

/// Encode every leaf of a local tree into its remote string form.
pub fn encode_tree(local: &Tree) -> Tree {
    local
        .iter()
        .map(|(key, value)| {
            let encoded = match value {
                Value::Object(sub) => Value::Object(encode_tree(sub)),
                leaf => Value::String(encode_leaf(leaf)),
            };
            (key.clone(), encoded)
        })
        .collect()
}
