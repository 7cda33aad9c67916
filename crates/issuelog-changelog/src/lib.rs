//! issuelog Changelog - changelog generation from releases and closed issues
//!
//! Issues are attributed to the release whose window contains their closing
//! date, classified by label, and rendered per release.

pub mod classifier;
pub mod formatter;
pub mod generator;
pub mod types;
pub mod window;

pub use classifier::{IssueClassifier, IssuePool};
pub use formatter::{ChangelogFormatter, FormatterRegistry, JsonFormatter, MarkdownFormatter};
pub use generator::ChangelogGenerator;
pub use types::{Issue, IssueEvent, Release};
pub use window::{build_windows, ReleaseWindow};
