//! Show subcommand: print the resolved settings.

use clap::Args;

/// Arguments for the show subcommand
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Output format: json, yaml or markdown
    #[arg(short, long, default_value = "yaml")]
    pub format: String,
}
