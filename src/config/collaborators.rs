//! Contract with the components configured from their own sections.
//!
//! The stock, the expansion and filter policies, and the scorer collection are
//! owned by the search engine. Configuration assembly only hands each of them
//! its popped section; what a section means is up to the component.

use crate::error::ConfigResult;
use serde_json::{Map, Value, json};
use std::fmt;

/// A component configured from one top-level section.
pub trait Collaborator: fmt::Debug {
    /// Apply the contents of this component's section.
    fn load_from_config(&mut self, section: Map<String, Value>) -> ConfigResult<()>;

    /// What the component was configured with, for display.
    fn snapshot(&self) -> Value {
        Value::Null
    }
}

/// The scorer collection, which also has built-in scorers.
pub trait ScorerCollection: Collaborator {
    /// Register the built-in scorers. Called before `load_from_config`.
    fn create_default_scorers(&mut self);
}

/// The four components a [`Configuration`](super::Configuration) owns.
#[derive(Debug)]
pub struct Collaborators {
    pub stock: Box<dyn Collaborator>,
    pub expansion_policy: Box<dyn Collaborator>,
    pub filter_policy: Box<dyn Collaborator>,
    pub scorers: Box<dyn ScorerCollection>,
}

impl Collaborators {
    /// Components that keep their sections for the search engine to consume.
    pub fn deferred() -> Self {
        Self {
            stock: Box::new(DeferredSection::new("stock")),
            expansion_policy: Box::new(DeferredSection::new("expansion")),
            filter_policy: Box::new(DeferredSection::new("filter")),
            scorers: Box::new(DeferredScorers::default()),
        }
    }
}

impl Default for Collaborators {
    fn default() -> Self {
        Self::deferred()
    }
}

/// Holds a section until the engine component that owns it is built.
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredSection {
    name: &'static str,
    section: Map<String, Value>,
    loaded: bool,
}

impl DeferredSection {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            section: Map::new(),
            loaded: false,
        }
    }

    /// Section name in the settings file.
    pub fn name(&self) -> &str {
        self.name
    }

    /// The section contents, with paths already anchored.
    pub fn section(&self) -> &Map<String, Value> {
        &self.section
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

impl Collaborator for DeferredSection {
    fn load_from_config(&mut self, section: Map<String, Value>) -> ConfigResult<()> {
        self.section.extend(section);
        self.loaded = true;
        Ok(())
    }

    fn snapshot(&self) -> Value {
        Value::Object(self.section.clone())
    }
}

/// Names of the scorers every collection starts with.
pub const DEFAULT_SCORERS: &[&str] = &[
    "state score",
    "number of reactions",
    "number of pre-cursors",
    "number of pre-cursors in stock",
    "average template occurrence",
];

/// Scorer collection that records built-in names and the `scorer` section.
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredScorers {
    names: Vec<String>,
    section: DeferredSection,
}

impl Default for DeferredScorers {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            section: DeferredSection::new("scorer"),
        }
    }
}

impl DeferredScorers {
    /// Registered scorer names, built-ins first.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn section(&self) -> &Map<String, Value> {
        self.section.section()
    }
}

impl Collaborator for DeferredScorers {
    fn load_from_config(&mut self, section: Map<String, Value>) -> ConfigResult<()> {
        self.section.load_from_config(section)
    }

    fn snapshot(&self) -> Value {
        json!({
            "scorers": self.names,
            "config": self.section.section(),
        })
    }
}

impl ScorerCollection for DeferredScorers {
    fn create_default_scorers(&mut self) {
        for name in DEFAULT_SCORERS {
            if !self.names.iter().any(|n| n == name) {
                self.names.push((*name).to_string());
            }
        }
    }
}
