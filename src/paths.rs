//! Resource path anchoring.
//!
//! Settings files refer to models, templates and stock files relative to the
//! repository root by prefixing them with a backslash, e.g.
//! `"\\data\\uspto_model.onnx"`. This module rewrites those strings into
//! absolute paths. It is pure: no filesystem I/O, and the input tree is
//! consumed and a new tree returned.

use serde_json::{Map, Value};
use std::path::Path;

/// Prefix marking a path relative to the repository root.
pub const PATH_SENTINEL: char = '\\';

/// Rewrite a single string if it carries the sentinel prefix.
///
/// All leading sentinels are stripped before joining onto `root`.
/// Returns `None` for strings that are not root-relative.
pub fn resolve_sentinel_path(value: &str, root: &Path) -> Option<String> {
    if !value.starts_with(PATH_SENTINEL) {
        return None;
    }
    let relative = value.trim_start_matches(PATH_SENTINEL);
    Some(root.join(relative).to_string_lossy().into_owned())
}

/// Rewrite every root-relative string in a nested settings tree.
///
/// Mappings and sequences are traversed at any depth; mapping keys, numbers,
/// booleans, nulls and strings without the sentinel pass through unchanged.
pub fn rewrite_paths(value: Value, root: &Path) -> Value {
    match value {
        Value::String(s) => match resolve_sentinel_path(&s, root) {
            Some(resolved) => Value::String(resolved),
            None => Value::String(s),
        },
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| rewrite_paths(item, root))
                .collect(),
        ),
        Value::Object(map) => Value::Object(rewrite_map(map, root)),
        other => other,
    }
}

/// [`rewrite_paths`] for a top-level mapping.
pub fn rewrite_map(map: Map<String, Value>, root: &Path) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| (key, rewrite_paths(value, root)))
        .collect()
}
