//! Output formatting for resolved settings.

use crate::config::{BondPair, Configuration};
use anyhow::Result;
use serde_json::{Value, json};

/// Output format for the `show` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            _ => None,
        }
    }
}

/// Everything a configuration resolved to, as one JSON value.
pub fn resolved_value(config: &Configuration) -> Result<Value> {
    let settings = serde_json::to_value(config.settings())?;
    Ok(json!({
        "search": settings["search"],
        "post_processing": settings["post_processing"],
        "stock": config.stock().snapshot(),
        "expansion": config.expansion_policy().snapshot(),
        "filter": config.filter_policy().snapshot(),
        "scorer": config.scorers().snapshot(),
    }))
}

/// Render a configuration in the requested format.
pub fn render(config: &Configuration, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&resolved_value(config)?)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&resolved_value(config)?)?),
        OutputFormat::Markdown => Ok(format_config_markdown(config)),
    }
}

/// Format a configuration as markdown.
pub fn format_config_markdown(config: &Configuration) -> String {
    let mut md = String::new();
    let search = config.search();
    let post = config.post_processing();

    md.push_str("## Search\n");
    md.push_str(&format!("- **algorithm**: {}\n", search.algorithm));
    md.push_str(&format!("- **max_transforms**: {}\n", search.max_transforms));
    md.push_str(&format!("- **iteration_limit**: {}\n", search.iteration_limit));
    md.push_str(&format!("- **time_limit**: {}s\n", search.time_limit));
    md.push_str(&format!("- **return_first**: {}\n", search.return_first));
    md.push_str(&format!(
        "- **exclude_target_from_stock**: {}\n",
        search.exclude_target_from_stock
    ));

    if !search.break_bonds.is_empty() {
        md.push_str(&format!(
            "- **break_bonds** ({}): {}\n",
            search.break_bonds_operator.as_str(),
            format_bonds(&search.break_bonds)
        ));
    }
    if !search.freeze_bonds.is_empty() {
        md.push_str(&format!(
            "- **freeze_bonds**: {}\n",
            format_bonds(&search.freeze_bonds)
        ));
    }

    md.push_str("\n### Algorithm parameters\n");
    for (key, value) in &search.algorithm_config {
        md.push_str(&format!("- `{}`: {}\n", key, value));
    }

    md.push_str("\n## Post-processing\n");
    if post.all_routes {
        md.push_str("- **routes**: all\n");
    } else {
        md.push_str(&format!(
            "- **routes**: {}..{}\n",
            post.min_routes, post.max_routes
        ));
    }
    md.push_str(&format!("- **route_scorer**: {}\n", post.route_scorer));
    if let Some(ref model) = post.route_distance_model {
        md.push_str(&format!("- **route_distance_model**: {}\n", model));
    }

    md.push_str("\n## Components\n");
    for (name, snapshot) in [
        ("stock", config.stock().snapshot()),
        ("expansion", config.expansion_policy().snapshot()),
        ("filter", config.filter_policy().snapshot()),
    ] {
        md.push_str(&format!("- **{}**: {}\n", name, section_keys(&snapshot)));
    }
    let scorers = config.scorers().snapshot();
    let registered = scorers["scorers"].as_array().map_or(0, Vec::len);
    let extra = section_keys(&scorers["config"]);
    md.push_str(&format!(
        "- **scorer**: {} registered, configured: {}\n",
        registered, extra
    ));

    md
}

fn format_bonds(bonds: &[BondPair]) -> String {
    bonds
        .iter()
        .map(|[a, b]| format!("{}-{}", a, b))
        .collect::<Vec<_>>()
        .join(", ")
}

fn section_keys(section: &Value) -> String {
    match section.as_object() {
        Some(map) if !map.is_empty() => map
            .keys()
            .map(|k| format!("`{}`", k))
            .collect::<Vec<_>>()
            .join(", "),
        _ => "(none)".to_string(),
    }
}
