//! Hosting source trait

use issuelog_core::Result;

use crate::types::{EventRecord, IssueRecord, ReleaseRecord};

/// Read access to a hosting service's releases and issues.
///
/// Transport, pagination and authentication are the implementor's concern;
/// every call returns fully materialized results.
pub trait HostingSource {
    /// All releases, newest first
    fn list_releases(&self) -> Result<Vec<ReleaseRecord>>;

    /// All closed issues and pull requests
    fn list_closed_issues(&self) -> Result<Vec<IssueRecord>>;

    /// Lifecycle events recorded on one issue
    fn list_issue_events(&self, number: u64) -> Result<Vec<EventRecord>>;
}
