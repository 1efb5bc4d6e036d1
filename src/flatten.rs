//! Flatten a nested local tree into `path=value` entries for the remote store.
//!
//! `{"svc": {"url": "pg://", "pool": 5}}` becomes `["svc.url=pg://", "svc.pool=5"]`.
//! Entries follow the tree's own key order. Sort the tree first if the
//! output has to be deterministic.

use std::fmt;

use serde_json::Value;

use crate::codec::encode_leaf;
use crate::error::SyncError;
use crate::tree::{Tree, dotted};

/// One leaf of a flattened tree: a dotted path and its remote string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    pub path: String,
    pub value: String,
}

impl fmt::Display for FlatEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.path, self.value)
    }
}

/// Flatten `tree` depth-first into one entry per leaf.
///
/// Fails with [`SyncError::EmptyTree`] when there are no leaves at all, since
/// the remote set call needs at least one entry.
pub fn flatten(tree: &Tree) -> Result<Vec<FlatEntry>, SyncError> {
    let mut out = Vec::new();
    flatten_into("", tree, &mut out);
    if out.is_empty() {
        return Err(SyncError::EmptyTree);
    }
    Ok(out)
}

fn flatten_into(prefix: &str, tree: &Tree, out: &mut Vec<FlatEntry>) {
    for (key, value) in tree {
        let path = dotted(prefix, key);
        match value {
            Value::Object(sub) => flatten_into(&path, sub, out),
            leaf => out.push(FlatEntry {
                path,
                value: encode_leaf(leaf),
            }),
        }
    }
}
