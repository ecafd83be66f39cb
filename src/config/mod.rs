//! Layered settings for a retrosynthesis planning run.
//!
//! Settings are assembled from three layers:
//! 1. **Defaults** - compiled into [`SearchConfig`] and [`PostprocessingConfig`]
//! 2. **Settings file** - a YAML document with the sections listed in [`SECTIONS`]
//! 3. **Environment** - `${NAME}` placeholders in the file text
//!
//! ## Pipeline
//! text → [`interpolate_env`] → YAML → [`find_repository_root`] →
//! [`rewrite_paths`](crate::paths::rewrite_paths) → [`Configuration::from_map_with`]
//!
//! ## Sections
//! - `search` - merged field by field into [`SearchConfig`]
//! - `post_processing` - replaces [`PostprocessingConfig`]
//! - `stock`, `expansion`, `filter`, `scorer` - handed to the components in
//!   [`Collaborators`]

mod aggregate;
mod bonds;
mod collaborators;
mod env;
mod loader;
mod merge;
mod root;
mod types;

pub use aggregate::{Configuration, SECTIONS, SettingsView};
pub use bonds::{BOND_SUFFIX, BondPair, normalize_bond_pairs};
pub use collaborators::{
    Collaborator, Collaborators, DEFAULT_SCORERS, DeferredScorers, DeferredSection,
    ScorerCollection,
};
pub use env::{EnvLookup, ProcessEnv, interpolate_env, placeholders};
pub use loader::ConfigLoader;
pub use merge::{apply_search_overrides, build_post_processing, take_section};
pub use root::{ROOT_MARKER, find_repository_root};
pub use types::{BondOperator, PostprocessingConfig, SearchConfig};
