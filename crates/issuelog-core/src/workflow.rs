//! Changelog output

use std::path::Path;

use tracing::info;

use crate::error::{ChangelogError, Result};

/// Write a rendered changelog, replacing any existing file
pub fn write_changelog(path: &Path, content: &str) -> Result<()> {
    info!(path = %path.display(), bytes = content.len(), "writing changelog");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ChangelogError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(path, content).map_err(|source| ChangelogError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
