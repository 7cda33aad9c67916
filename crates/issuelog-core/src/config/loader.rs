//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::types::Config;
use super::validation::validate_config;

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<Config> {
    let is_toml = path.extension().is_some_and(|e| e == "toml");
    info!(
        path = %path.display(),
        format = if is_toml { "TOML" } else { "YAML" },
        "loading config"
    );

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

    let config: Config = if is_toml {
        toml::from_str(&content).map_err(ConfigError::TomlError)?
    } else {
        serde_yaml::from_str(&content).map_err(ConfigError::YamlError)?
    };

    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Find configuration file in directory or parent directories.
///
/// At each directory level the search checks `<dir>/<name>` and then
/// `<dir>/.github/<name>`. The first match wins.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let candidates = [current.join(name), current.join(".github").join(name)];
            if let Some(found) = candidates.into_iter().find(|p| p.exists()) {
                info!(path = %found.display(), "found config file");
                return Some(found);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration, or use defaults rooted at `dir` when no file exists.
///
/// A config file that exists but fails to parse or validate is an error.
pub fn load_config_or_default(dir: &Path) -> Result<(Config, Option<PathBuf>)> {
    match find_config(dir) {
        Some(config_path) => {
            let config = load_rooted(&config_path)?;
            Ok((config, Some(config_path)))
        }
        None => {
            warn!(dir = %dir.display(), "no config found, using defaults");
            let mut config = Config::default();
            rebase_paths(&mut config, dir, dir);
            Ok((config, None))
        }
    }
}

fn load_rooted(config_path: &Path) -> Result<Config> {
    let mut config = load_config(config_path)?;
    if let Some(config_dir) = config_path.parent() {
        rebase_paths(&mut config, config_dir, project_root(config_dir));
    }
    Ok(config)
}

/// The snapshot is relative to the config file's directory; the output file
/// is relative to the project root.
fn rebase_paths(config: &mut Config, config_dir: &Path, root: &Path) {
    config.source.snapshot = resolve_relative(config_dir, &config.source.snapshot);
    if let Some(file) = config.changelog.file.take() {
        config.changelog.file = Some(resolve_relative(root, &file));
    }
}

/// Directory a config file governs: its own, or the parent of `.github/`
fn project_root(config_dir: &Path) -> &Path {
    match config_dir.parent() {
        Some(parent) if config_dir.file_name().is_some_and(|n| n == ".github") => parent,
        _ => config_dir,
    }
}

fn resolve_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
