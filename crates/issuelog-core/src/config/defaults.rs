//! Default configuration values

use crate::types::{ChangeType, TypeMap};

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "issuelog.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "issuelog.yaml";

/// Default snapshot file name
pub const DEFAULT_SNAPSHOT_FILE: &str = "issuelog-snapshot.json";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".issuelog.toml",
        ".issuelog.yaml",
    ]
}

/// Labels that select each change type, in match priority order
pub fn default_labels() -> TypeMap<Vec<String>> {
    [
        (ChangeType::Added, vec!["feature".to_string()]),
        (ChangeType::Changed, vec!["enhancement".to_string()]),
        (ChangeType::Fixed, vec!["bug".to_string()]),
    ]
    .into_iter()
    .collect()
}

/// Section headings for the keep-a-changelog types
pub fn default_headings() -> TypeMap<String> {
    [
        ChangeType::Added,
        ChangeType::Changed,
        ChangeType::Deprecated,
        ChangeType::Removed,
        ChangeType::Fixed,
        ChangeType::Security,
    ]
    .into_iter()
    .map(|ty| (ty, ty.derived_heading()))
    .collect()
}
