//! Changelog generation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use issuelog_core::config::ChangelogConfig;
use issuelog_core::{ChangelogError, Result};
use issuelog_hosting::HostingSource;

use crate::classifier::{IssueClassifier, IssuePool};
use crate::formatter::{ChangelogFormatter, FormatterRegistry};
use crate::types::{Issue, Release};
use crate::window::{build_windows, ReleaseWindow};

/// Changelog generator
pub struct ChangelogGenerator {
    classifier: IssueClassifier,
    formatter: Arc<dyn ChangelogFormatter>,
    since: Option<DateTime<Utc>>,
}

impl ChangelogGenerator {
    /// Create a generator from configuration
    pub fn new(config: &ChangelogConfig) -> Result<Self> {
        let registry = FormatterRegistry::new(config.resolved_headings());
        let formatter = registry
            .for_format(&config.format)
            .ok_or_else(|| ChangelogError::UnsupportedFormat(config.format.clone()))?;

        Ok(Self {
            classifier: IssueClassifier::new(config.resolved_labels()),
            formatter,
            since: config.since,
        })
    }

    /// Use a custom formatter
    pub fn with_formatter<F: ChangelogFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    /// Fetch releases and closed issues and attribute the issues to releases.
    ///
    /// Fails with `NoReleasesFound` before any issue is fetched when the
    /// source has no releases. Any malformed timestamp aborts the run.
    #[instrument(skip(self, source))]
    pub fn collect<S: HostingSource + ?Sized>(&self, source: &S) -> Result<Vec<Release>> {
        let records = source.list_releases()?;
        info!(release_count = records.len(), "releases fetched");
        let releases = records
            .iter()
            .map(Release::from_record)
            .collect::<Result<Vec<_>>>()?;
        let windows = build_windows(releases, self.since)?;

        let mut issues = Vec::new();
        for record in source.list_closed_issues()? {
            let events = source.list_issue_events(record.number)?;
            issues.push(Issue::from_record(&record, &events)?);
        }
        info!(issue_count = issues.len(), "closed issues fetched");

        Ok(self.attribute(windows, IssuePool::new(issues)))
    }

    /// Walk windows newest first, draining the pool into each release
    pub fn attribute(&self, windows: Vec<ReleaseWindow>, mut pool: IssuePool) -> Vec<Release> {
        let releases: Vec<Release> = windows
            .into_iter()
            .map(|window| {
                let changes = self.classifier.classify_window(&mut pool, &window);
                let mut release = window.release;
                release.changes = changes;
                release
            })
            .collect();

        debug!(
            release_count = releases.len(),
            unclaimed = pool.len(),
            "issues attributed"
        );
        releases
    }

    /// Format releases to a changelog document
    pub fn format(&self, releases: &[Release]) -> Result<String> {
        self.formatter.format(releases)
    }

    /// Collect and format in one step
    #[instrument(skip(self, source))]
    pub fn generate<S: HostingSource + ?Sized>(&self, source: &S) -> Result<String> {
        let releases = self.collect(source)?;
        let output = self.format(&releases)?;
        debug!(output_len = output.len(), "changelog generated");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use issuelog_core::{ChangeType, IssuelogError};
    use issuelog_hosting::{EventRecord, IssueRecord, ReleaseRecord, Snapshot, SnapshotSource};

    const HEADER: &str = "# Changelog\nThis project adheres to [Semantic Versioning](https://semver.org/spec/v2.0.0.html).\n\n";

    fn two_releases() -> Snapshot {
        Snapshot::default()
            .with_release(ReleaseRecord::new(
                "v2.0",
                "2020-02-01T00:00:00Z",
                "https://example.com/releases/v2.0",
            ))
            .with_release(ReleaseRecord::new(
                "v1.0",
                "2020-01-01T00:00:00Z",
                "https://example.com/releases/v1.0",
            ))
    }

    fn closed(number: u64, title: &str, closed_at: &str) -> IssueRecord {
        IssueRecord::closed(number, title, closed_at)
            .with_url(format!("https://example.com/issues/{}", number))
    }

    fn commit() -> Vec<EventRecord> {
        vec![EventRecord::new("closed", Some("abc"))]
    }

    fn generator() -> ChangelogGenerator {
        ChangelogGenerator::new(&ChangelogConfig::default()).unwrap()
    }

    #[test]
    fn test_fix_lands_in_newer_release() {
        let snapshot = two_releases().with_issue(
            closed(5, "Fix crash", "2020-01-15T00:00:00Z").with_label("bug"),
            commit(),
        );

        let output = generator()
            .generate(&SnapshotSource::new(snapshot))
            .unwrap();

        let expected = format!(
            "{}## [v2.0](https://example.com/releases/v2.0) - 2020-02-01\n\
             ### Fixed\n\
             - Fix crash [#5](https://example.com/issues/5)\n\
             \n",
            HEADER
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_no_releases_is_fatal() {
        let snapshot = Snapshot::default().with_issue(
            closed(1, "Orphan", "2020-01-15T00:00:00Z").with_label("bug"),
            commit(),
        );
        let err = generator()
            .generate(&SnapshotSource::new(snapshot))
            .unwrap_err();
        assert!(matches!(
            err,
            IssuelogError::Changelog(ChangelogError::NoReleasesFound)
        ));
    }

    #[test]
    fn test_malformed_release_aborts_run() {
        let snapshot = two_releases()
            .with_release(ReleaseRecord::new("v0.1", "not a date", ""))
            .with_issue(
                closed(1, "Fine", "2020-01-15T00:00:00Z").with_label("bug"),
                commit(),
            );
        assert!(generator()
            .generate(&SnapshotSource::new(snapshot))
            .is_err());
    }

    #[test]
    fn test_each_issue_attributed_once() {
        let snapshot = two_releases()
            .with_issue(closed(1, "Old", "2019-12-01T00:00:00Z").with_label("bug"), commit())
            .with_issue(closed(2, "Mid", "2020-01-15T00:00:00Z").with_label("bug"), commit())
            .with_issue(closed(3, "New", "2020-03-01T00:00:00Z").with_label("bug"), commit())
            .with_issue(closed(4, "Edge", "2020-01-01T00:00:00Z").with_label("bug"), commit());

        let releases = generator().collect(&SnapshotSource::new(snapshot)).unwrap();

        let numbers = |release: &Release| -> Vec<u64> {
            release
                .changes
                .get(ChangeType::Fixed)
                .map(|issues| issues.iter().map(|i| i.number).collect())
                .unwrap_or_default()
        };
        assert_eq!(numbers(&releases[0]), vec![2, 3]);
        assert_eq!(numbers(&releases[1]), vec![1, 4]);
        let total: usize = releases.iter().map(Release::issue_count).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_unknown_and_ungated_issues_not_rendered() {
        let snapshot = two_releases()
            .with_issue(closed(1, "Question", "2020-01-15T00:00:00Z"), commit())
            .with_issue(
                closed(2, "No commit", "2020-01-16T00:00:00Z").with_label("bug"),
                vec![EventRecord::new("closed", None)],
            )
            .with_issue(
                closed(3, "Bump deps", "2020-01-17T00:00:00Z").as_pull_request(),
                vec![EventRecord::new("merged", Some("def"))],
            );

        let output = generator()
            .generate(&SnapshotSource::new(snapshot))
            .unwrap();

        assert!(!output.contains("Question"));
        assert!(!output.contains("No commit"));
        assert!(output.contains("### Pull-request\n- Bump deps [#3]"));
    }

    #[test]
    fn test_ungated_issue_not_reattributed_to_older_release() {
        let snapshot = two_releases().with_issue(
            closed(2, "No commit", "2020-01-16T00:00:00Z").with_label("bug"),
            vec![EventRecord::new("closed", None)],
        );

        let releases = generator().collect(&SnapshotSource::new(snapshot)).unwrap();
        assert!(releases.iter().all(|r| !r.has_changes()));
    }

    #[test]
    fn test_since_leaves_older_issues_unclaimed() {
        let mut config = ChangelogConfig::default();
        config.since = Some(
            DateTime::parse_from_rfc3339("2020-01-01T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        );
        let snapshot = two_releases()
            .with_issue(closed(1, "Old", "2019-12-01T00:00:00Z").with_label("bug"), commit())
            .with_issue(closed(2, "New", "2020-01-15T00:00:00Z").with_label("bug"), commit());

        let releases = ChangelogGenerator::new(&config)
            .unwrap()
            .collect(&SnapshotSource::new(snapshot))
            .unwrap();

        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].tag, "v2.0");
        assert_eq!(releases[0].issue_count(), 1);
    }

    #[test]
    fn test_configured_labels_and_headings() {
        let mut config = ChangelogConfig::default();
        config
            .labels
            .insert(ChangeType::Security, vec!["CVE".to_string()]);
        config
            .headings
            .insert(ChangeType::Security, "### Security Fixes".to_string());
        let snapshot = two_releases().with_issue(
            closed(7, "Patch overflow", "2020-01-20T00:00:00Z").with_label("cve"),
            commit(),
        );

        let output = ChangelogGenerator::new(&config)
            .unwrap()
            .generate(&SnapshotSource::new(snapshot))
            .unwrap();

        assert!(output.contains("### Security Fixes\n- Patch overflow [#7]"));
    }

    #[test]
    fn test_unsupported_format() {
        let config = ChangelogConfig {
            format: "html".to_string(),
            ..ChangelogConfig::default()
        };
        assert!(ChangelogGenerator::new(&config).is_err());
    }

    #[test]
    fn test_json_format() {
        let config = ChangelogConfig {
            format: "json".to_string(),
            ..ChangelogConfig::default()
        };
        let snapshot = two_releases().with_issue(
            closed(5, "Fix crash", "2020-01-15T00:00:00Z").with_label("bug"),
            commit(),
        );

        let output = ChangelogGenerator::new(&config)
            .unwrap()
            .generate(&SnapshotSource::new(snapshot))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["changes"]["fixed"][0]["title"], "Fix crash");
    }
}
