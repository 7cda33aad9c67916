//! Snapshot-backed hosting source

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use issuelog_core::{Result, SourceError};

use crate::source::HostingSource;
use crate::types::{EventRecord, IssueRecord, ReleaseRecord};

/// Captured export of a repository's releases, issues and issue events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub releases: Vec<ReleaseRecord>,
    #[serde(default)]
    pub issues: Vec<IssueRecord>,
    /// Events keyed by issue number
    #[serde(default)]
    pub events: HashMap<u64, Vec<EventRecord>>,
}

impl Snapshot {
    /// Add a release
    pub fn with_release(mut self, release: ReleaseRecord) -> Self {
        self.releases.push(release);
        self
    }

    /// Add an issue together with its events
    pub fn with_issue(mut self, issue: IssueRecord, events: Vec<EventRecord>) -> Self {
        self.events.insert(issue.number, events);
        self.issues.push(issue);
        self
    }
}

/// [`HostingSource`] that answers from a [`Snapshot`]
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    snapshot: Snapshot,
}

impl SnapshotSource {
    /// Wrap an in-memory snapshot
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Read a snapshot from a JSON file
    #[instrument]
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SourceError::SnapshotNotFound(path.to_path_buf()).into());
        }

        let content = std::fs::read_to_string(path).map_err(SourceError::Io)?;
        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(|source| SourceError::SnapshotDecode {
                path: path.to_path_buf(),
                source,
            })?;

        info!(
            releases = snapshot.releases.len(),
            issues = snapshot.issues.len(),
            "snapshot loaded"
        );
        Ok(Self::new(snapshot))
    }
}

impl HostingSource for SnapshotSource {
    fn list_releases(&self) -> Result<Vec<ReleaseRecord>> {
        Ok(self.snapshot.releases.clone())
    }

    fn list_closed_issues(&self) -> Result<Vec<IssueRecord>> {
        let closed: Vec<IssueRecord> = self
            .snapshot
            .issues
            .iter()
            .filter(|i| i.is_closed())
            .cloned()
            .collect();
        debug!(
            total = self.snapshot.issues.len(),
            closed = closed.len(),
            "listing closed issues"
        );
        Ok(closed)
    }

    fn list_issue_events(&self, number: u64) -> Result<Vec<EventRecord>> {
        Ok(self
            .snapshot
            .events
            .get(&number)
            .cloned()
            .unwrap_or_default())
    }
}
