//! Issue attribution and classification

use tracing::{debug, trace};

use issuelog_core::{ChangeType, TypeMap};

use crate::types::Issue;
use crate::window::ReleaseWindow;

/// Closed issues not yet attributed to a release.
///
/// The pool is drained window by window, newest release first, and the same
/// pool must be threaded through every window so that no issue lands in two
/// releases.
#[derive(Debug, Default)]
pub struct IssuePool {
    issues: Vec<Issue>,
}

impl IssuePool {
    /// Create a pool from closed issues
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// Remove and return every issue the window admits, in pool order
    pub fn claim(&mut self, window: &ReleaseWindow) -> Vec<Issue> {
        let (claimed, remaining): (Vec<Issue>, Vec<Issue>) = std::mem::take(&mut self.issues)
            .into_iter()
            .partition(|issue| window.admits(issue.closed_at));
        self.issues = remaining;
        claimed
    }

    /// Number of unclaimed issues
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Check if every issue has been claimed
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Assigns change types to issues from their labels
#[derive(Debug, Clone)]
pub struct IssueClassifier {
    labels: TypeMap<Vec<String>>,
}

impl IssueClassifier {
    /// Create a classifier over a label mapping. Mapping order is match
    /// priority.
    pub fn new(labels: TypeMap<Vec<String>>) -> Self {
        Self { labels }
    }

    /// Determine the change type of one issue.
    ///
    /// The first mapped type with a matching label wins. Unmatched pull
    /// requests fall back to [`ChangeType::PullRequest`], anything else is
    /// [`ChangeType::Unknown`].
    pub fn classify(&self, issue: &Issue) -> ChangeType {
        let matched = self
            .labels
            .iter()
            .find(|(_, names)| names.iter().any(|name| issue.has_label(name)))
            .map(|(change_type, _)| change_type);

        match matched {
            Some(change_type) => change_type,
            None if issue.pull_request => ChangeType::PullRequest,
            None => ChangeType::Unknown,
        }
    }

    /// Claim the window's issues from the pool and bucket the reportable ones.
    ///
    /// Buckets follow mapping order with pull requests last; empty buckets
    /// are dropped. Claimed issues that are unknown or lack a linked commit
    /// are discarded, not returned to the pool.
    pub fn classify_window(
        &self,
        pool: &mut IssuePool,
        window: &ReleaseWindow,
    ) -> TypeMap<Vec<Issue>> {
        let mut buckets: TypeMap<Vec<Issue>> = self
            .labels
            .keys()
            .chain(std::iter::once(ChangeType::PullRequest))
            .filter(ChangeType::is_reportable)
            .map(|change_type| (change_type, Vec::new()))
            .collect();

        let claimed = pool.claim(window);
        let claimed_count = claimed.len();

        for issue in claimed {
            let change_type = self.classify(&issue);
            if !change_type.is_reportable() || !issue.has_linked_commit() {
                trace!(number = issue.number, %change_type, "issue claimed without output");
                continue;
            }
            if let Some(bucket) = buckets.get_mut(change_type) {
                bucket.push(issue);
            }
        }

        buckets.retain(|_, issues| !issues.is_empty());
        debug!(
            tag = %window.release.tag,
            claimed = claimed_count,
            reported = buckets.iter().map(|(_, v)| v.len()).sum::<usize>(),
            remaining = pool.len(),
            "window classified"
        );
        buckets
    }
}
