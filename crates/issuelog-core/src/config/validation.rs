//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::types::ChangeType;

use super::types::Config;

/// Accepted values for `changelog.format`
pub const VALID_FORMATS: [&str; 3] = ["markdown", "md", "json"];

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_source(config)?;
    validate_format(config)?;
    validate_labels(config)?;
    validate_headings(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
}

fn validate_source(config: &Config) -> Result<()> {
    if config.source.snapshot.as_os_str().is_empty() {
        return Err(invalid("source.snapshot", "snapshot path cannot be empty").into());
    }
    Ok(())
}

fn validate_format(config: &Config) -> Result<()> {
    if !VALID_FORMATS.contains(&config.changelog.format.as_str()) {
        return Err(invalid(
            "changelog.format",
            format!("must be one of: {}", VALID_FORMATS.join(", ")),
        )
        .into());
    }
    Ok(())
}

fn validate_labels(config: &Config) -> Result<()> {
    for (change_type, labels) in config.changelog.labels.iter() {
        let field = format!("changelog.labels.{}", change_type);
        if change_type == ChangeType::Unknown {
            return Err(invalid(field, "unknown is the fallback type and takes no labels").into());
        }
        if labels.is_empty() {
            return Err(invalid(field, "label list cannot be empty").into());
        }
        if labels.iter().any(|l| l.trim().is_empty()) {
            return Err(invalid(field, "label names cannot be blank").into());
        }
    }
    Ok(())
}

fn validate_headings(config: &Config) -> Result<()> {
    for (change_type, heading) in config.changelog.headings.iter() {
        if heading.trim().is_empty() {
            return Err(invalid(
                format!("changelog.headings.{}", change_type),
                "heading cannot be blank",
            )
            .into());
        }
    }
    Ok(())
}
