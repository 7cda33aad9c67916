//! Configuration types

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::TypeMap;

use super::defaults::{default_headings, default_labels, DEFAULT_SNAPSHOT_FILE};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where release and issue data comes from
    pub source: SourceConfig,

    /// Changelog configuration
    pub changelog: ChangelogConfig,
}

/// Hosting source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// JSON export of releases, closed issues and their events.
    /// Relative paths are resolved against the config file's directory.
    pub snapshot: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from(DEFAULT_SNAPSHOT_FILE),
        }
    }
}

/// Changelog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Output file; stdout when unset. Relative paths are resolved against
    /// the project root (the config file's directory, or the parent of
    /// `.github/`).
    pub file: Option<PathBuf>,

    /// Output format (markdown, md, json)
    pub format: String,

    /// Label overrides, merged over the default label mapping
    pub labels: TypeMap<Vec<String>>,

    /// Heading overrides, merged over the default headings
    pub headings: TypeMap<String>,

    /// Skip releases published at or before this instant.
    /// Accepts an RFC 3339 string or a native TOML datetime.
    #[serde(deserialize_with = "deserialize_since")]
    pub since: Option<DateTime<Utc>>,
}

fn deserialize_since<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let text = match Option::<toml::Value>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(toml::Value::String(s)) => s,
        Some(toml::Value::Datetime(dt)) => dt.to_string(),
        Some(other) => {
            return Err(D::Error::custom(format!(
                "expected an RFC 3339 date and time, found {}",
                other.type_str()
            )))
        }
    };
    DateTime::parse_from_rfc3339(&text)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|e| D::Error::custom(format!("invalid since '{}': {}", text, e)))
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: None,
            format: "markdown".to_string(),
            labels: TypeMap::new(),
            headings: TypeMap::new(),
            since: None,
        }
    }
}

impl ChangelogConfig {
    /// Label mapping with the configured overrides applied
    pub fn resolved_labels(&self) -> TypeMap<Vec<String>> {
        default_labels().merged(self.labels.clone())
    }

    /// Heading mapping with the configured overrides applied
    pub fn resolved_headings(&self) -> TypeMap<String> {
        default_headings().merged(self.headings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChangeType;
    use chrono::TimeZone;

    #[test]
    fn test_resolved_labels_default_order() {
        let config = ChangelogConfig::default();
        let keys: Vec<_> = config.resolved_labels().keys().collect();
        assert_eq!(
            keys,
            vec![ChangeType::Added, ChangeType::Changed, ChangeType::Fixed]
        );
    }

    #[test]
    fn test_resolved_labels_override_wins() {
        let mut config = ChangelogConfig::default();
        config
            .labels
            .insert(ChangeType::Fixed, vec!["bug".into(), "regression".into()]);
        config
            .labels
            .insert(ChangeType::Security, vec!["security".into()]);

        let labels = config.resolved_labels();
        assert_eq!(
            labels.get(ChangeType::Fixed).unwrap(),
            &vec!["bug".to_string(), "regression".to_string()]
        );
        assert_eq!(labels.keys().last(), Some(ChangeType::Security));
    }

    #[test]
    fn test_resolved_headings_override_wins() {
        let mut config = ChangelogConfig::default();
        config
            .headings
            .insert(ChangeType::Fixed, "### Bug Fixes".to_string());

        let headings = config.resolved_headings();
        assert_eq!(headings.get(ChangeType::Fixed).unwrap(), "### Bug Fixes");
        assert_eq!(headings.get(ChangeType::Added).unwrap(), "### Added");
        assert!(headings.get(ChangeType::PullRequest).is_none());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r####"
[source]
snapshot = "data/export.json"

[changelog]
format = "json"
since = "2020-01-01T00:00:00Z"

[changelog.labels]
fixed = ["bug", "crash"]
deprecated = ["deprecation"]

[changelog.headings]
pull-request = "### Merged Pull Requests"
"####;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.source.snapshot, PathBuf::from("data/export.json"));
        assert_eq!(config.changelog.format, "json");
        assert_eq!(
            config.changelog.since,
            Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(config.changelog.labels.len(), 2);
        assert_eq!(
            config
                .changelog
                .resolved_headings()
                .get(ChangeType::PullRequest)
                .unwrap(),
            "### Merged Pull Requests"
        );
    }

    #[test]
    fn test_since_native_toml_datetime() {
        let config: Config =
            toml::from_str("[changelog]\nsince = 2020-01-01T02:00:00+02:00\n").unwrap();
        assert_eq!(
            config.changelog.since,
            Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_since_yaml_plain_scalar() {
        let config: Config =
            serde_yaml::from_str("changelog:\n  since: 2020-01-01T00:00:00Z\n").unwrap();
        assert_eq!(
            config.changelog.since,
            Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_since_rejects_local_datetime() {
        let result = toml::from_str::<Config>("[changelog]\nsince = 2020-01-01T00:00:00\n");
        assert!(result.is_err());
    }
}
