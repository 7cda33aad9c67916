//! JSON changelog formatter

use tracing::{debug, instrument};

use issuelog_core::Result;

use super::ChangelogFormatter;
use crate::types::Release;

/// Serializes the releases that have changes as a pretty-printed JSON array
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl ChangelogFormatter for JsonFormatter {
    #[instrument(skip(self, releases), fields(release_count = releases.len()))]
    fn format(&self, releases: &[Release]) -> Result<String> {
        let reported: Vec<&Release> = releases.iter().filter(|r| r.has_changes()).collect();
        let output = serde_json::to_string_pretty(&reported)?;
        debug!(output_len = output.len(), "json changelog formatted");
        Ok(output)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
