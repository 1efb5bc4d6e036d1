use serde_json::Value;

use crate::tree::{Tree, as_container};

/// Keep only the keys of `source` that also exist at the same position in
/// `reference`.
///
/// Values always come from `source`. When `source` has a container where
/// `reference` has a leaf, the branch is kept but comes back empty. Keys that
/// only `reference` has are never added.
pub fn intersect_by_shape(source: &Tree, reference: &Tree) -> Tree {
    let empty = Tree::new();
    source
        .iter()
        .filter_map(|(key, value)| {
            let counterpart = reference.get(key)?;
            let kept = match as_container(value) {
                Some(sub) => {
                    let sub_reference = as_container(counterpart).unwrap_or(&empty);
                    Value::Object(intersect_by_shape(sub, sub_reference))
                }
                None => value.clone(),
            };
            Some((key.clone(), kept))
        })
        .collect()
}
