//! `${NAME}` interpolation over raw settings text.
//!
//! Substitution happens on the text before YAML parsing, so a placeholder may
//! appear anywhere in the document, including inside keys or lists.

use crate::error::{ConfigError, ConfigResult};
use regex_lite::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

/// Source of environment values.
///
/// The loader never reads `std::env` directly; it goes through this trait so
/// callers (and tests) can supply their own variables.
pub trait EnvLookup {
    /// Value of `name`, or `None` when undefined.
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvLookup for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

impl EnvLookup for BTreeMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        BTreeMap::get(self, name).cloned()
    }
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{(.+?)\}").expect("placeholder pattern is valid"))
}

/// Distinct placeholder names in order of first appearance.
pub fn placeholders(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in placeholder_regex().captures_iter(text) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Replace every `${NAME}` in `text` with its value from `env`.
///
/// Fails on the first undefined variable; nothing is substituted in that case.
/// Inserted values are not scanned again.
pub fn interpolate_env(text: &str, env: &dyn EnvLookup) -> ConfigResult<String> {
    let mut values = HashMap::new();
    for name in placeholders(text) {
        let value = env
            .get(&name)
            .ok_or_else(|| ConfigError::MissingEnvironmentVariable { name: name.clone() })?;
        values.insert(name, value);
    }

    if values.is_empty() {
        return Ok(text.to_string());
    }

    let substituted = placeholder_regex().replace_all(text, |caps: &regex_lite::Captures<'_>| {
        // Every captured name was resolved above.
        values.get(&caps[1]).cloned().unwrap_or_default()
    });
    Ok(substituted.into_owned())
}
