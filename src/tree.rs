//! Nested config trees and the predicate that tells containers from leaves.
//!
//! Both remote and local config are JSON objects keyed by service, then by
//! variable name. `Value::Object` is a container; every other JSON value
//! (string, number, bool, null, array) is a leaf. Arrays are never recursed
//! into by any transform in this crate.
//!
//! With serde_json's `preserve_order` feature the map keeps keys in the
//! order they were read, which is the "natural" order transforms walk in.

use serde_json::{Map, Value};

use crate::error::SyncError;

/// A nested config mapping.
pub type Tree = Map<String, Value>;

/// Remote config: every leaf is a string. See [`validate_remote`].
pub type RemoteTree = Tree;

/// Local config: leaves may be any JSON value.
pub type LocalTree = Tree;

/// Returns the mapping if `value` is a container, `None` for any leaf.
pub fn as_container(value: &Value) -> Option<&Tree> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

pub fn is_container(value: &Value) -> bool {
    as_container(value).is_some()
}

/// Join a parent path and a key with `.`.
pub fn dotted(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Unwrap a parsed JSON document into a tree, rejecting non-object roots.
pub fn require_tree(value: Value, what: &str) -> Result<Tree, SyncError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(SyncError::malformed(
            what,
            format!("expected a JSON object, found {}", kind_of(&other)),
        )),
    }
}

/// Check that every leaf of a remote tree is a string.
pub fn validate_remote(tree: &Tree) -> Result<(), SyncError> {
    validate_remote_at("", tree)
}

fn validate_remote_at(prefix: &str, tree: &Tree) -> Result<(), SyncError> {
    for (key, value) in tree {
        let path = dotted(prefix, key);
        match value {
            Value::Object(sub) => validate_remote_at(&path, sub)?,
            Value::String(_) => {}
            other => {
                return Err(SyncError::malformed(
                    "remote config",
                    format!("leaf '{path}' is {}, expected a string", kind_of(other)),
                ));
            }
        }
    }
    Ok(())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn objects_are_containers() {
        assert!(is_container(&json!({})));
        assert!(is_container(&json!({"a": 1})));
    }

    #[test]
    fn arrays_and_null_are_leaves() {
        assert!(!is_container(&json!([1, 2])));
        assert!(!is_container(&json!([])));
        assert!(!is_container(&Value::Null));
    }

    #[test]
    fn primitives_are_leaves() {
        assert!(!is_container(&json!("x")));
        assert!(!is_container(&json!(42)));
        assert!(!is_container(&json!(false)));
    }

    #[test]
    fn dotted_joins_with_dot() {
        assert_eq!(dotted("", "svc"), "svc");
        assert_eq!(dotted("svc", "key"), "svc.key");
        assert_eq!(dotted("a.b", "c"), "a.b.c");
    }

    #[test]
    fn require_tree_accepts_object() {
        let tree = require_tree(json!({"svc": {"a": "1"}}), "local config").unwrap();
        assert!(tree.contains_key("svc"));
    }

    #[test]
    fn require_tree_rejects_array_root() {
        let err = require_tree(json!(["svc"]), "local config").unwrap_err();
        assert!(matches!(err, SyncError::MalformedInput { .. }));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn validate_remote_accepts_string_leaves() {
        let tree = require_tree(json!({"svc": {"a": "1", "b": "two"}}), "remote").unwrap();
        assert!(validate_remote(&tree).is_ok());
    }

    #[test]
    fn validate_remote_rejects_number_leaf() {
        let tree = require_tree(json!({"svc": {"a": 1}}), "remote").unwrap();
        let err = validate_remote(&tree).unwrap_err();
        assert!(err.to_string().contains("svc.a"));
    }

    #[test]
    fn validate_remote_recurses_deeply() {
        let tree = require_tree(json!({"a": {"b": {"c": null}}}), "remote").unwrap();
        let err = validate_remote(&tree).unwrap_err();
        assert!(err.to_string().contains("a.b.c"));
    }
}
