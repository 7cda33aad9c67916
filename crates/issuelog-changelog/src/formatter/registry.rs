//! Formatter registry

use std::sync::Arc;

use issuelog_core::TypeMap;

use super::{ChangelogFormatter, JsonFormatter, MarkdownFormatter};

/// Registry of available changelog formatters
pub struct FormatterRegistry {
    formatters: Vec<Arc<dyn ChangelogFormatter>>,
}

impl FormatterRegistry {
    /// Create a registry with the built-in formatters
    pub fn new(headings: TypeMap<String>) -> Self {
        Self {
            formatters: vec![
                Arc::new(MarkdownFormatter::new(headings)),
                Arc::new(JsonFormatter),
            ],
        }
    }

    /// Get formatter by file extension
    pub fn get(&self, extension: &str) -> Option<Arc<dyn ChangelogFormatter>> {
        self.formatters
            .iter()
            .find(|f| f.extension() == extension)
            .cloned()
    }

    /// Get formatter by configured format name (`markdown`, `md`, `json`)
    pub fn for_format(&self, format: &str) -> Option<Arc<dyn ChangelogFormatter>> {
        match format {
            "markdown" => self.get("md"),
            other => self.get(other),
        }
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new(issuelog_core::config::default_headings())
    }
}
