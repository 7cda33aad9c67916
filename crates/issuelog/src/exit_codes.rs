//! Exit codes for the binary

use issuelog_core::{ChangelogError, IssuelogError};

/// Success
pub const SUCCESS: u8 = 0;

/// General error
pub const ERROR: u8 = 1;

/// Configuration error
pub const CONFIG_ERROR: u8 = 2;

/// Hosting source could not be read
pub const SOURCE_ERROR: u8 = 3;

/// The source has no releases
pub const NO_RELEASES: u8 = 4;

/// Pick the exit code for a failed run
pub fn for_error(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<IssuelogError>() {
        Some(IssuelogError::Config(_)) => CONFIG_ERROR,
        Some(IssuelogError::Source(_)) => SOURCE_ERROR,
        Some(IssuelogError::Changelog(ChangelogError::NoReleasesFound)) => NO_RELEASES,
        _ => ERROR,
    }
}
