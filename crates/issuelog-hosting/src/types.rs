//! Hosting service records
//!
//! Field names follow the hosting service's REST payloads so exports can be
//! deserialized without translation. Timestamps stay as strings here; the
//! changelog crate parses them.

use serde::{Deserialize, Deserializer, Serialize};

/// A published release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    /// Tag the release points at
    pub tag_name: String,
    /// RFC 3339 publish time; absent for drafts
    #[serde(default)]
    pub published_at: Option<String>,
    /// Web URL of the release page
    #[serde(default)]
    pub html_url: String,
}

impl ReleaseRecord {
    /// Create a new release record
    pub fn new(
        tag_name: impl Into<String>,
        published_at: impl Into<String>,
        html_url: impl Into<String>,
    ) -> Self {
        Self {
            tag_name: tag_name.into(),
            published_at: Some(published_at.into()),
            html_url: html_url.into(),
        }
    }
}

/// An issue label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRecord {
    pub name: String,
}

/// Marker object present on issues that are pull requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRef {
    #[serde(default)]
    pub html_url: Option<String>,
}

/// An issue or pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub html_url: String,
    /// "open" or "closed"
    #[serde(default = "default_state")]
    pub state: String,
    /// RFC 3339 close time
    #[serde(default)]
    pub closed_at: Option<String>,
    /// Absent and `null` both mean no labels
    #[serde(default, deserialize_with = "null_as_empty")]
    pub labels: Vec<LabelRecord>,
    #[serde(default)]
    pub pull_request: Option<PullRequestRef>,
}

fn default_state() -> String {
    "closed".to_string()
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl IssueRecord {
    /// Create a closed issue record
    pub fn closed(number: u64, title: impl Into<String>, closed_at: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            html_url: String::new(),
            state: "closed".to_string(),
            closed_at: Some(closed_at.into()),
            labels: Vec::new(),
            pull_request: None,
        }
    }

    /// Set the web URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.html_url = url.into();
        self
    }

    /// Add a label
    pub fn with_label(mut self, name: impl Into<String>) -> Self {
        self.labels.push(LabelRecord { name: name.into() });
        self
    }

    /// Mark as a pull request
    pub fn as_pull_request(mut self) -> Self {
        self.pull_request = Some(PullRequestRef::default());
        self
    }

    /// Whether this record is closed
    pub fn is_closed(&self) -> bool {
        self.state.eq_ignore_ascii_case("closed")
    }

    /// Label names in the order the service listed them
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|l| l.name.as_str())
    }
}

/// A lifecycle event on an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Event kind (closed, merged, referenced, labeled, ...)
    pub event: String,
    #[serde(default)]
    pub commit_id: Option<String>,
}

impl EventRecord {
    /// Create a new event record
    pub fn new(event: impl Into<String>, commit_id: Option<&str>) -> Self {
        Self {
            event: event.into(),
            commit_id: commit_id.map(str::to_string),
        }
    }
}
