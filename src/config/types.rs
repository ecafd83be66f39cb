//! Typed settings records.
//!
//! These hold the parameters of the tree search and of route post-processing.
//! Defaults are compiled in; a settings file only needs to list what it changes.

use super::bonds::BondPair;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// How `break_bonds` constraints are combined when scoring a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BondOperator {
    /// All listed bonds must be broken (default).
    #[default]
    And,
    /// Breaking any one listed bond is enough.
    Or,
}

impl BondOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BondOperator::And => "and",
            BondOperator::Or => "or",
        }
    }
}

/// Settings of the tree search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search algorithm identifier (default: "mcts").
    pub algorithm: String,
    /// Algorithm-specific parameters. Overrides are merged into the defaults.
    pub algorithm_config: Map<String, Value>,
    /// Maximum depth of the route tree (default: 6).
    pub max_transforms: i64,
    /// Maximum number of search iterations (default: 100).
    pub iteration_limit: i64,
    /// Wall-clock limit in seconds (default: 120).
    pub time_limit: i64,
    /// Stop as soon as a solved route is found.
    pub return_first: bool,
    /// Do not count the target molecule as in stock.
    pub exclude_target_from_stock: bool,
    /// Bonds the routes should break.
    pub break_bonds: Vec<BondPair>,
    /// Bonds the routes must not break.
    pub freeze_bonds: Vec<BondPair>,
    /// Combination rule for `break_bonds`.
    pub break_bonds_operator: BondOperator,
}

impl SearchConfig {
    /// Every setting name accepted in the `search` section.
    pub const FIELDS: &'static [&'static str] = &[
        "algorithm",
        "algorithm_config",
        "max_transforms",
        "iteration_limit",
        "time_limit",
        "return_first",
        "exclude_target_from_stock",
        "break_bonds",
        "freeze_bonds",
        "break_bonds_operator",
    ];

    /// Default parameters of the MCTS algorithm.
    pub fn default_algorithm_config() -> Map<String, Value> {
        let defaults = json!({
            "C": 1.4,
            "default_prior": 0.5,
            "use_prior": true,
            "prune_cycles_in_search": true,
            "search_reward": "state score",
            "immediate_instantiation": [],
            "mcts_grouping": null,
        });
        match defaults {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    pub fn has_field(name: &str) -> bool {
        Self::FIELDS.contains(&name)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: "mcts".to_string(),
            algorithm_config: Self::default_algorithm_config(),
            max_transforms: 6,
            iteration_limit: 100,
            time_limit: 120,
            return_first: false,
            exclude_target_from_stock: true,
            break_bonds: Vec::new(),
            freeze_bonds: Vec::new(),
            break_bonds_operator: BondOperator::default(),
        }
    }
}

/// Settings of route extraction after the search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostprocessingConfig {
    /// Minimum number of routes to extract (default: 5).
    pub min_routes: i64,
    /// Maximum number of routes to extract (default: 25).
    pub max_routes: i64,
    /// Extract every solved route, ignoring the bounds.
    pub all_routes: bool,
    /// Model used to compute distances between routes for clustering.
    pub route_distance_model: Option<String>,
    /// Scorer used to rank routes (default: "state score").
    pub route_scorer: String,
}

impl Default for PostprocessingConfig {
    fn default() -> Self {
        Self {
            min_routes: 5,
            max_routes: 25,
            all_routes: false,
            route_distance_model: None,
            route_scorer: "state score".to_string(),
        }
    }
}
