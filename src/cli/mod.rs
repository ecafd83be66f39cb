//! CLI command definitions for retrosynth-config
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod show;

use clap::{Parser, Subcommand};
use show::ShowArgs;
use std::path::{Path, PathBuf};

/// Environment variable naming the settings file.
pub const CONFIG_ENV_VAR: &str = "RETROSYNTH_CONFIG";

/// Settings file looked for in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// Validate and inspect retrosynthesis planner settings
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the settings file (default if no subcommand given)
    Check,

    /// Print the resolved settings
    Show(ShowArgs),
}

/// Pick the settings file to load.
///
/// Order: explicit path, `RETROSYNTH_CONFIG`, `./config.yml`, then
/// `<config dir>/retrosynth/config.yml`. Returns `None` when nothing exists.
pub fn discover_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }

    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("retrosynth").join(DEFAULT_CONFIG_FILE))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_show_with_format() {
        let cli = Cli::try_parse_from(["retrosynth-config", "-c", "a.yml", "show", "--format", "yaml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("a.yml")));
        match cli.command {
            Some(Command::Show(args)) => assert_eq!(args.format, "yaml"),
            other => panic!("Expected show, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["retrosynth-config"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log, "2");
        assert!(!cli.verbose);
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = discover_config_path(Some(Path::new("/tmp/explicit.yml")));
        assert_eq!(path, Some(PathBuf::from("/tmp/explicit.yml")));
    }
}
