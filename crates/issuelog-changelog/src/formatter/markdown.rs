//! Markdown changelog formatter

use tracing::{debug, instrument};

use issuelog_core::{ChangeType, Result, TypeMap};

use super::ChangelogFormatter;
use crate::types::{Issue, Release};

/// Document title line
pub const TITLE: &str = "# Changelog";

/// Semantic versioning note printed under the title
pub const SEMVER_NOTE: &str =
    "This project adheres to [Semantic Versioning](https://semver.org/spec/v2.0.0.html).";

/// Markdown changelog formatter
pub struct MarkdownFormatter {
    headings: TypeMap<String>,
}

impl MarkdownFormatter {
    /// Create a formatter with per-type headings. Types without an entry get
    /// a heading derived from their name.
    pub fn new(headings: TypeMap<String>) -> Self {
        Self { headings }
    }

    /// Heading line for a change type
    pub fn heading(&self, change_type: ChangeType) -> String {
        self.headings
            .get(change_type)
            .cloned()
            .unwrap_or_else(|| change_type.derived_heading())
    }

    fn write_release(&self, output: &mut String, release: &Release) {
        output.push_str(&format!(
            "## [{}]({}) - {}\n",
            release.tag,
            release.url,
            release.published_at.format("%Y-%m-%d")
        ));

        for (change_type, issues) in release.changes.iter() {
            if issues.is_empty() {
                continue;
            }
            output.push_str(&self.heading(change_type));
            output.push('\n');
            for issue in issues {
                write_issue(output, issue);
            }
            output.push('\n');
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new(issuelog_core::config::default_headings())
    }
}

fn write_issue(output: &mut String, issue: &Issue) {
    output.push_str(&format!(
        "- {} [#{}]({})\n",
        issue.title, issue.number, issue.url
    ));
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, releases), fields(release_count = releases.len()))]
    fn format(&self, releases: &[Release]) -> Result<String> {
        let mut output = format!("{}\n{}\n\n", TITLE, SEMVER_NOTE);

        for release in releases.iter().filter(|r| r.has_changes()) {
            self.write_release(&mut output, release);
        }

        debug!(output_len = output.len(), "markdown changelog formatted");
        Ok(output)
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn release_with(changes: Vec<(ChangeType, Vec<Issue>)>) -> Release {
        let mut release = Release::new(
            "v2.0",
            Utc.with_ymd_and_hms(2020, 2, 1, 15, 30, 0).unwrap(),
            "https://example.com/releases/v2.0",
        );
        release.changes = changes.into_iter().collect();
        release
    }

    fn issue(number: u64, title: &str) -> Issue {
        Issue::new(number, title, Utc::now())
            .with_url(format!("https://example.com/issues/{}", number))
    }

    #[test]
    fn test_header_only_for_no_releases() {
        let output = MarkdownFormatter::default().format(&[]).unwrap();
        assert_eq!(output, format!("{}\n{}\n\n", TITLE, SEMVER_NOTE));
    }

    #[test]
    fn test_format_release_section() {
        let release = release_with(vec![
            (ChangeType::Added, vec![issue(3, "Add export")]),
            (ChangeType::Fixed, vec![issue(5, "Fix crash"), issue(6, "Fix leak")]),
        ]);

        let output = MarkdownFormatter::default().format(&[release]).unwrap();

        let expected = format!(
            "{}\n{}\n\n\
             ## [v2.0](https://example.com/releases/v2.0) - 2020-02-01\n\
             ### Added\n\
             - Add export [#3](https://example.com/issues/3)\n\
             \n\
             ### Fixed\n\
             - Fix crash [#5](https://example.com/issues/5)\n\
             - Fix leak [#6](https://example.com/issues/6)\n\
             \n",
            TITLE, SEMVER_NOTE
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_empty_buckets_and_releases_skipped() {
        let empty = release_with(vec![(ChangeType::Added, vec![])]);
        let output = MarkdownFormatter::default().format(&[empty]).unwrap();
        assert!(!output.contains("## ["));
        assert!(!output.contains("### Added"));
    }

    #[test]
    fn test_derived_heading_for_unconfigured_type() {
        let release = release_with(vec![(ChangeType::PullRequest, vec![issue(9, "Tidy CI")])]);
        let output = MarkdownFormatter::default().format(&[release]).unwrap();
        assert!(output.contains("### Pull-request\n- Tidy CI [#9]"));
    }

    #[test]
    fn test_configured_heading() {
        let headings: TypeMap<String> = [(ChangeType::Fixed, "### Bug Fixes".to_string())]
            .into_iter()
            .collect();
        let formatter = MarkdownFormatter::new(headings);
        assert_eq!(formatter.heading(ChangeType::Fixed), "### Bug Fixes");
        assert_eq!(formatter.heading(ChangeType::Added), "### Added");
    }
}
