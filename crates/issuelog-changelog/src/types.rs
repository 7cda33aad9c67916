//! Changelog types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use issuelog_core::{ChangelogError, Result, TypeMap};
use issuelog_hosting::{EventRecord, IssueRecord, ReleaseRecord};

/// Event kinds that can tie an issue to a commit
const COMMIT_EVENT_KINDS: [&str; 4] = ["merged", "referenced", "closed", "reopened"];

/// A release and the issues attributed to it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    /// Tag name
    pub tag: String,
    /// Publish timestamp
    pub published_at: DateTime<Utc>,
    /// Release page URL
    pub url: String,
    /// Issues grouped by change type
    pub changes: TypeMap<Vec<Issue>>,
}

impl Release {
    /// Create a release with no changes attached
    pub fn new(tag: impl Into<String>, published_at: DateTime<Utc>, url: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            published_at,
            url: url.into(),
            changes: TypeMap::new(),
        }
    }

    /// Build a release from a hosting record
    pub fn from_record(record: &ReleaseRecord) -> Result<Self> {
        let subject = format!("release {}", record.tag_name);
        let published_at = parse_timestamp(&subject, record.published_at.as_deref())?;
        Ok(Self::new(&record.tag_name, published_at, &record.html_url))
    }

    /// Check if any change bucket has issues
    pub fn has_changes(&self) -> bool {
        self.changes.iter().any(|(_, issues)| !issues.is_empty())
    }

    /// Total issues attached across all buckets
    pub fn issue_count(&self) -> usize {
        self.changes.iter().map(|(_, issues)| issues.len()).sum()
    }
}

/// A closed issue or pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub closed_at: DateTime<Utc>,
    pub labels: Vec<String>,
    pub pull_request: bool,
    #[serde(skip)]
    pub events: Vec<IssueEvent>,
}

impl Issue {
    /// Create an issue with no labels or events
    pub fn new(number: u64, title: impl Into<String>, closed_at: DateTime<Utc>) -> Self {
        Self {
            number,
            title: title.into(),
            url: String::new(),
            closed_at,
            labels: Vec::new(),
            pull_request: false,
            events: Vec::new(),
        }
    }

    /// Build an issue from a hosting record and its events
    pub fn from_record(record: &IssueRecord, events: &[EventRecord]) -> Result<Self> {
        let subject = format!("issue #{}", record.number);
        let closed_at = parse_timestamp(&subject, record.closed_at.as_deref())?;
        Ok(Self {
            number: record.number,
            title: record.title.clone(),
            url: record.html_url.clone(),
            closed_at,
            labels: record.label_names().map(str::to_string).collect(),
            pull_request: record.pull_request.is_some(),
            events: events.iter().map(IssueEvent::from).collect(),
        })
    }

    /// Set the URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Add a label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Mark as a pull request
    pub fn as_pull_request(mut self) -> Self {
        self.pull_request = true;
        self
    }

    /// Add an event
    pub fn with_event(mut self, event: IssueEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Case-insensitive exact label match
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.to_lowercase() == name.to_lowercase())
    }

    /// Whether the issue was resolved by a recorded commit
    pub fn has_linked_commit(&self) -> bool {
        self.events.iter().any(IssueEvent::links_commit)
    }
}

/// A lifecycle event on an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueEvent {
    pub kind: String,
    pub commit_id: Option<String>,
}

impl IssueEvent {
    /// Create a new event
    pub fn new(kind: impl Into<String>, commit_id: Option<&str>) -> Self {
        Self {
            kind: kind.into(),
            commit_id: commit_id.map(str::to_string),
        }
    }

    /// Commit-bearing kind with a non-empty commit id
    pub fn links_commit(&self) -> bool {
        COMMIT_EVENT_KINDS.contains(&self.kind.as_str())
            && self.commit_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

impl From<&EventRecord> for IssueEvent {
    fn from(record: &EventRecord) -> Self {
        Self {
            kind: record.event.clone(),
            commit_id: record.commit_id.clone(),
        }
    }
}

fn parse_timestamp(subject: &str, value: Option<&str>) -> Result<DateTime<Utc>> {
    let value = value.ok_or_else(|| ChangelogError::MissingTimestamp {
        subject: subject.to_string(),
    })?;
    let parsed =
        DateTime::parse_from_rfc3339(value).map_err(|source| ChangelogError::InvalidTimestamp {
            subject: subject.to_string(),
            value: value.to_string(),
            source,
        })?;
    Ok(parsed.with_timezone(&Utc))
}
