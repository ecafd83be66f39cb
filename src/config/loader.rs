//! Settings file loading.
//!
//! Reads a YAML settings file and runs it through the assembly pipeline:
//! environment interpolation, parsing, repository root discovery, path
//! anchoring and finally [`Configuration::from_map_with`].

use super::aggregate::Configuration;
use super::collaborators::Collaborators;
use super::env::{EnvLookup, ProcessEnv, interpolate_env};
use super::root::{ROOT_MARKER, find_root_with_marker};
use crate::error::{ConfigError, ConfigResult, kind_of};
use crate::paths::rewrite_map;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads settings files.
///
/// By default it reads the process environment and looks for the repository
/// root above the current working directory. Both can be replaced.
pub struct ConfigLoader {
    /// Variables used for `${NAME}` placeholders.
    env: Box<dyn EnvLookup>,
    /// Where the repository root search starts (default: working directory).
    start_dir: Option<PathBuf>,
    /// Directory name marking the repository root.
    root_marker: String,
}

impl std::fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("start_dir", &self.start_dir)
            .field("root_marker", &self.root_marker)
            .finish_non_exhaustive()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            env: Box::new(ProcessEnv),
            start_dir: None,
            root_marker: ROOT_MARKER.to_string(),
        }
    }

    /// Use `env` instead of the process environment.
    pub fn with_env(mut self, env: impl EnvLookup + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Start the repository root search at `dir`.
    pub fn with_start_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_dir = Some(dir.into());
        self
    }

    /// Look for a `marker` directory instead of [`ROOT_MARKER`].
    pub fn with_root_marker(mut self, marker: impl Into<String>) -> Self {
        self.root_marker = marker.into();
        self
    }

    /// Load a settings file with the default deferred components.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> ConfigResult<Configuration> {
        self.load_with(path, Collaborators::deferred())
    }

    /// Load a settings file, handing its sections to `collaborators`.
    pub fn load_with<P: AsRef<Path>>(
        &self,
        path: P,
        collaborators: Collaborators,
    ) -> ConfigResult<Configuration> {
        let document = self.read_document(path.as_ref())?;
        Configuration::from_map_with(document, collaborators)
    }

    /// Read, interpolate, parse and anchor a settings file without building
    /// the configuration.
    pub fn read_document(&self, path: &Path) -> ConfigResult<Map<String, Value>> {
        let text = read_settings_text(path)?;
        let text = interpolate_env(&text, self.env.as_ref())?;
        let document = parse_document(path, &text)?;

        let root = self.repository_root()?;
        debug!(
            path = %path.display(),
            root = %root.display(),
            "Anchoring resource paths"
        );
        Ok(rewrite_map(document, &root))
    }

    fn repository_root(&self) -> ConfigResult<PathBuf> {
        let start = match &self.start_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(|source| ConfigError::Io {
                path: PathBuf::from("."),
                source,
            })?,
        };
        find_root_with_marker(&start, &self.root_marker)
    }
}

fn read_settings_text(path: &Path) -> ConfigResult<String> {
    debug!(path = %path.display(), "Reading settings file");
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

fn parse_document(path: &Path, text: &str) -> ConfigResult<Map<String, Value>> {
    let value: Value = serde_yaml::from_str(text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    match value {
        // Empty or comment-only files parse as null
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map),
        other => Err(ConfigError::InvalidDocument {
            found: kind_of(&other).to_string(),
        }),
    }
}
