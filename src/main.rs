//! retrosynth-config
//!
//! Validates a retrosynthesis planner settings file and prints what it
//! resolves to.

use anyhow::{Result, anyhow};
use clap::Parser;
use retrosynth_config::cli::{Cli, Command, discover_config_path};
use retrosynth_config::config::{ConfigLoader, placeholders};
use retrosynth_config::format::{OutputFormat, render};
use retrosynth_config::logging::{self, LogTarget};
use std::process::ExitCode;
use tracing::{debug, info};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let path = discover_config_path(cli.config.as_deref()).ok_or_else(|| {
        anyhow!("No settings file given and none found (use --config or RETROSYNTH_CONFIG)")
    })?;
    debug!(path = %path.display(), "Using settings file");

    let loader = ConfigLoader::new();
    let config = match loader.load(&path) {
        Ok(config) => config,
        Err(err) => {
            debug!(code = err.code().as_str(), "Configuration assembly failed");
            eprintln!("{}: {}", err.code().as_str(), err);
            return Ok(ExitCode::FAILURE);
        }
    };

    match cli.command.unwrap_or(Command::Check) {
        Command::Check => {
            let text = std::fs::read_to_string(&path)?;
            let variables = placeholders(&text);
            info!(variables = variables.len(), "Settings file is valid");
            println!(
                "OK {} (algorithm: {}, max_transforms: {}, environment variables: {})",
                path.display(),
                config.search().algorithm,
                config.search().max_transforms,
                if variables.is_empty() {
                    "none".to_string()
                } else {
                    variables.join(", ")
                }
            );
        }
        Command::Show(args) => {
            let format = OutputFormat::from_str(&args.format)
                .ok_or_else(|| anyhow!("Unknown output format: {}", args.format))?;
            println!("{}", render(&config, format)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}
