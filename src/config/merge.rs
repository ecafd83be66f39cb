//! Field-by-field merging of user overrides into the typed defaults.
//!
//! - `null` means "not specified": the default is kept
//! - Unknown `search` keys are errors, never silently dropped
//! - `algorithm_config` is merged key by key, not replaced
//! - `*_bonds` lists are validated before assignment
//! - `post_processing` is rebuilt from scratch with defaults for missing keys

use super::bonds::{BOND_SUFFIX, normalize_bond_pairs};
use super::types::{PostprocessingConfig, SearchConfig};
use crate::error::{ConfigError, ConfigResult, kind_of};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Remove `name` from the document, returning its mapping.
///
/// A missing or `null` section is an empty mapping.
pub fn take_section(document: &mut Map<String, Value>, name: &str) -> ConfigResult<Map<String, Value>> {
    match document.remove(name) {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(ConfigError::invalid_section(
            name,
            format!("expected a mapping, found {}", kind_of(&other)),
        )),
    }
}

/// Apply the overrides of a `search` section onto `search`.
///
/// Either every override is applied or, on error, `search` is left as it was.
pub fn apply_search_overrides(
    search: &mut SearchConfig,
    overrides: Map<String, Value>,
) -> ConfigResult<()> {
    let mut next = search.clone();
    for (key, value) in overrides {
        if value.is_null() {
            debug!(setting = %key, "Keeping default for null search setting");
            continue;
        }
        if !SearchConfig::has_field(&key) {
            return Err(ConfigError::UnknownSetting { key });
        }

        if key.ends_with(BOND_SUFFIX) {
            let pairs = normalize_bond_pairs(&key, &value)?;
            match key.as_str() {
                "break_bonds" => next.break_bonds = pairs,
                "freeze_bonds" => next.freeze_bonds = pairs,
                _ => return Err(ConfigError::UnknownSetting { key }),
            }
            continue;
        }

        match key.as_str() {
            "algorithm_config" => {
                let Value::Object(params) = value else {
                    return Err(ConfigError::InvalidAlgorithmConfig {
                        found: kind_of(&value).to_string(),
                    });
                };
                next.algorithm_config.extend(params);
            }
            "algorithm" => next.algorithm = field_value(&key, value)?,
            "max_transforms" => next.max_transforms = field_value(&key, value)?,
            "iteration_limit" => next.iteration_limit = field_value(&key, value)?,
            "time_limit" => next.time_limit = field_value(&key, value)?,
            "return_first" => next.return_first = field_value(&key, value)?,
            "exclude_target_from_stock" => {
                next.exclude_target_from_stock = field_value(&key, value)?
            }
            "break_bonds_operator" => next.break_bonds_operator = field_value(&key, value)?,
            _ => return Err(ConfigError::UnknownSetting { key }),
        }
    }
    *search = next;
    Ok(())
}

/// Build a fresh post-processing record from its section.
pub fn build_post_processing(section: Map<String, Value>) -> ConfigResult<PostprocessingConfig> {
    let config: PostprocessingConfig = serde_json::from_value(Value::Object(section))
        .map_err(|e| ConfigError::invalid_section("post_processing", e.to_string()))?;

    if !config.all_routes && config.min_routes > config.max_routes {
        warn!(
            min_routes = config.min_routes,
            max_routes = config.max_routes,
            "post_processing.min_routes exceeds max_routes"
        );
    }
    Ok(config)
}

fn field_value<T: DeserializeOwned>(key: &str, value: Value) -> ConfigResult<T> {
    serde_json::from_value(value).map_err(|e| ConfigError::invalid_setting(key, e.to_string()))
}
