//! The assembled configuration of a planning run.

use super::collaborators::{Collaborator, Collaborators, ScorerCollection};
use super::loader::ConfigLoader;
use super::merge::{apply_search_overrides, build_post_processing, take_section};
use super::types::{PostprocessingConfig, SearchConfig};
use crate::error::{ConfigError, ConfigResult, kind_of};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, warn};

/// Top-level sections the settings file may contain.
pub const SECTIONS: &[&str] = &[
    "expansion",
    "filter",
    "stock",
    "scorer",
    "search",
    "post_processing",
];

/// Settings of the tree search together with the components it uses.
///
/// Built once at startup, either from an in-memory mapping
/// ([`Configuration::from_map`]) or from a settings file
/// ([`Configuration::from_file`], [`ConfigLoader`]).
///
/// There is no `PartialEq`: the components cannot be compared meaningfully.
/// Use [`Configuration::settings_eq`] to compare the typed settings.
#[derive(Debug)]
pub struct Configuration {
    search: SearchConfig,
    post_processing: PostprocessingConfig,
    stock: Box<dyn Collaborator>,
    expansion_policy: Box<dyn Collaborator>,
    filter_policy: Box<dyn Collaborator>,
    scorers: Box<dyn ScorerCollection>,
}

/// Serializable view of the typed settings.
#[derive(Debug, Serialize)]
pub struct SettingsView<'a> {
    pub search: &'a SearchConfig,
    pub post_processing: &'a PostprocessingConfig,
}

impl Configuration {
    /// Build from a mapping, with the default deferred components.
    pub fn from_map(document: Map<String, Value>) -> ConfigResult<Self> {
        Self::from_map_with(document, Collaborators::deferred())
    }

    /// Build from any parsed value; it must be a mapping (or `null`).
    pub fn from_value(document: Value) -> ConfigResult<Self> {
        match document {
            Value::Null => Self::from_map(Map::new()),
            Value::Object(map) => Self::from_map(map),
            other => Err(ConfigError::InvalidDocument {
                found: kind_of(&other).to_string(),
            }),
        }
    }

    /// Build from a mapping, handing each section to the given components.
    ///
    /// Components are loaded in the order stock, expansion policy, filter
    /// policy, scorers. Any failure discards everything built so far.
    pub fn from_map_with(
        mut document: Map<String, Value>,
        collaborators: Collaborators,
    ) -> ConfigResult<Self> {
        let expansion_section = take_section(&mut document, "expansion")?;
        let filter_section = take_section(&mut document, "filter")?;
        let stock_section = take_section(&mut document, "stock")?;
        let scorer_section = take_section(&mut document, "scorer")?;
        let post_processing_section = take_section(&mut document, "post_processing")?;
        let search_section = take_section(&mut document, "search")?;

        for key in document.keys() {
            warn!(section = %key, "Ignoring unrecognized top-level section");
        }

        let post_processing = build_post_processing(post_processing_section)?;
        let mut search = SearchConfig::default();
        apply_search_overrides(&mut search, search_section)?;

        let Collaborators {
            mut stock,
            mut expansion_policy,
            mut filter_policy,
            mut scorers,
        } = collaborators;

        stock.load_from_config(stock_section)?;
        expansion_policy.load_from_config(expansion_section)?;
        filter_policy.load_from_config(filter_section)?;
        scorers.create_default_scorers();
        scorers.load_from_config(scorer_section)?;

        debug!(
            algorithm = %search.algorithm,
            max_transforms = search.max_transforms,
            "Configuration assembled"
        );

        Ok(Self {
            search,
            post_processing,
            stock,
            expansion_policy,
            filter_policy,
            scorers,
        })
    }

    /// Load from a YAML settings file using the process environment and the
    /// repository containing the working directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        ConfigLoader::new().load(path)
    }

    /// Compare the typed settings only.
    ///
    /// Search and post-processing records are compared field by field; the
    /// stock, policies and scorers are ignored.
    pub fn settings_eq(&self, other: &Configuration) -> bool {
        self.search == other.search && self.post_processing == other.post_processing
    }

    pub fn search(&self) -> &SearchConfig {
        &self.search
    }

    pub fn post_processing(&self) -> &PostprocessingConfig {
        &self.post_processing
    }

    /// Replace the search settings.
    pub fn set_search(&mut self, search: SearchConfig) {
        self.search = search;
    }

    /// Replace the post-processing settings.
    pub fn set_post_processing(&mut self, post_processing: PostprocessingConfig) {
        self.post_processing = post_processing;
    }

    pub fn stock(&self) -> &dyn Collaborator {
        self.stock.as_ref()
    }

    pub fn expansion_policy(&self) -> &dyn Collaborator {
        self.expansion_policy.as_ref()
    }

    pub fn filter_policy(&self) -> &dyn Collaborator {
        self.filter_policy.as_ref()
    }

    pub fn scorers(&self) -> &dyn ScorerCollection {
        self.scorers.as_ref()
    }

    pub fn settings(&self) -> SettingsView<'_> {
        SettingsView {
            search: &self.search,
            post_processing: &self.post_processing,
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        let mut collaborators = Collaborators::deferred();
        collaborators.scorers.create_default_scorers();
        Self {
            search: SearchConfig::default(),
            post_processing: PostprocessingConfig::default(),
            stock: collaborators.stock,
            expansion_policy: collaborators.expansion_policy,
            filter_policy: collaborators.filter_policy,
            scorers: collaborators.scorers,
        }
    }
}
