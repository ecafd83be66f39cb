//! Retrosynthesis planner settings library
//!
//! Assembles the run-time settings of the route search from compiled-in
//! defaults, a YAML settings file and environment placeholders.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod paths;
