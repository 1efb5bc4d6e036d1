//! Find deployed entries that the local file no longer has.
//!
//! The walk goes over `deployed`. A key missing from `local` is reported as a
//! single path and not descended into, because unsetting a parent path removes
//! everything under it. Recursion also stops where `local` holds a leaf but
//! `deployed` holds a container: nothing below that point is reported. That
//! asymmetry is intentional; `purge` relies on it to leave such branches alone.

use crate::tree::{Tree, as_container, dotted};

/// Dotted paths present in `deployed` but absent from `local`.
///
/// Paths are listed in `deployed`'s key order.
pub fn missing_paths(deployed: &Tree, local: &Tree) -> Vec<String> {
    let mut out = Vec::new();
    collect_missing("", deployed, local, &mut out);
    out
}

fn collect_missing(prefix: &str, deployed: &Tree, local: &Tree, out: &mut Vec<String>) {
    for (key, deployed_value) in deployed {
        let path = dotted(prefix, key);
        let Some(local_value) = local.get(key) else {
            out.push(path);
            continue;
        };
        if let (Some(deployed_sub), Some(local_sub)) =
            (as_container(deployed_value), as_container(local_value))
        {
            collect_missing(&path, deployed_sub, local_sub, out);
        }
    }
}
