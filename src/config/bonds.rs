//! Validation of bond-pair lists (`break_bonds`, `freeze_bonds`).

use crate::error::{ConfigError, ConfigResult, kind_of};
use serde_json::Value;

/// A bond given as the atom-mapping numbers of its two atoms.
pub type BondPair = [i64; 2];

/// Suffix shared by all bond-list search settings.
pub const BOND_SUFFIX: &str = "_bonds";

/// Check that `value` is a list of two-element integer lists and convert it.
///
/// `key` is only used for error messages. An empty list is valid.
pub fn normalize_bond_pairs(key: &str, value: &Value) -> ConfigResult<Vec<BondPair>> {
    let Value::Array(items) = value else {
        return Err(ConfigError::malformed_bonds(
            key,
            format!("bond settings need to be lists, found {}", kind_of(value)),
        ));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| bond_pair(key, index, item))
        .collect()
}

fn bond_pair(key: &str, index: usize, item: &Value) -> ConfigResult<BondPair> {
    let Value::Array(atoms) = item else {
        return Err(ConfigError::malformed_bonds(
            key,
            format!("entry {index} must be a list, found {}", kind_of(item)),
        ));
    };
    if atoms.len() != 2 {
        return Err(ConfigError::malformed_bonds(
            key,
            format!(
                "lists of bond pairs should be of length 2, entry {index} has length {}",
                atoms.len()
            ),
        ));
    }

    let atom = |position: usize| {
        atoms[position].as_i64().ok_or_else(|| {
            ConfigError::malformed_bonds(
                key,
                format!(
                    "entry {index} must contain integers, found {}",
                    kind_of(&atoms[position])
                ),
            )
        })
    };
    Ok([atom(0)?, atom(1)?])
}
