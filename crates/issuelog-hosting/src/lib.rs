//! issuelog Hosting - release and issue data from a hosting service
//!
//! This crate defines the records a hosting service returns, the
//! [`HostingSource`] trait the changelog generator reads through, and a
//! snapshot-backed implementation of it.

mod snapshot;
mod source;
pub mod types;

pub use snapshot::{Snapshot, SnapshotSource};
pub use source::HostingSource;
pub use types::{EventRecord, IssueRecord, LabelRecord, PullRequestRef, ReleaseRecord};
