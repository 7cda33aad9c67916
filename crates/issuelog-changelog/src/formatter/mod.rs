//! Changelog formatters

mod json;
mod markdown;
mod registry;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use registry::FormatterRegistry;

use issuelog_core::Result;

use crate::types::Release;

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Render the full changelog document for releases ordered newest first
    fn format(&self, releases: &[Release]) -> Result<String>;

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;
}
