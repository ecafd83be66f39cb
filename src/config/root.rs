//! Repository root discovery.

use crate::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory whose presence marks the repository root.
pub const ROOT_MARKER: &str = ".git";

/// Walk from `start` towards the filesystem root and return the first
/// directory containing a [`ROOT_MARKER`] directory.
///
/// The walk ends at the filesystem root; reaching it without a match is
/// [`ConfigError::RepositoryRootNotFound`].
pub fn find_repository_root(start: &Path) -> ConfigResult<PathBuf> {
    find_root_with_marker(start, ROOT_MARKER)
}

/// Walk from `start` to the first directory containing a `marker` directory.
/// A relative `start` is resolved against the working directory.
pub(crate) fn find_root_with_marker(start: &Path, marker: &str) -> ConfigResult<PathBuf> {
    let start = if start.is_absolute() {
        start.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|source| ConfigError::Io {
                path: start.to_path_buf(),
                source,
            })?
            .join(start)
    };

    let mut current = start.as_path();
    loop {
        if current.join(marker).is_dir() {
            debug!(root = %current.display(), "Found repository root");
            return Ok(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) if parent != current => current = parent,
            _ => {
                return Err(ConfigError::RepositoryRootNotFound {
                    start: start.clone(),
                });
            }
        }
    }
}
