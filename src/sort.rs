use serde_json::Value;

use crate::tree::{Tree, as_container};

/// Return a copy of `tree` with keys at every level in ascending order.
///
/// Keys compare as `str` does: by Unicode code point. That differs from
/// UTF-16 code unit order only for keys holding characters above U+FFFF.
/// Leaves are cloned unchanged; arrays keep their element order.
pub fn sort_tree(tree: &Tree) -> Tree {
    let mut entries: Vec<(&String, &Value)> = tree.iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    entries
        .into_iter()
        .map(|(key, value)| (key.clone(), sort_value(value)))
        .collect()
}

/// [`sort_tree`] lifted to any value: identity on leaves.
pub fn sort_value(value: &Value) -> Value {
    match as_container(value) {
        Some(tree) => Value::Object(sort_tree(tree)),
        None => value.clone(),
    }
}
