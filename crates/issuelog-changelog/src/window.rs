//! Release windowing
//!
//! Each release owns the span of time between the previous (older) release's
//! publish date, exclusive, and its own publish date. The oldest release has
//! no lower bound.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use issuelog_core::{ChangelogError, Result};

use crate::types::Release;

/// A release paired with the lower bound of its attribution window
#[derive(Debug, Clone)]
pub struct ReleaseWindow {
    pub release: Release,
    /// Publish date of the next-older release; `None` for the oldest
    pub after: Option<DateTime<Utc>>,
}

impl ReleaseWindow {
    /// Whether an issue closed at `closed_at` falls into this window
    pub fn admits(&self, closed_at: DateTime<Utc>) -> bool {
        self.after.map_or(true, |bound| closed_at > bound)
    }
}

/// Pair every release with its window, newest first.
///
/// Releases are stably sorted newest first before pairing. Releases published
/// at or before `since` are dropped; their windows are never built, so the
/// issues they would have claimed stay in the pool.
pub fn build_windows(
    mut releases: Vec<Release>,
    since: Option<DateTime<Utc>>,
) -> Result<Vec<ReleaseWindow>> {
    if releases.is_empty() {
        return Err(ChangelogError::NoReleasesFound.into());
    }

    releases.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    let bounds: Vec<Option<DateTime<Utc>>> = releases
        .iter()
        .skip(1)
        .map(|r| Some(r.published_at))
        .chain(std::iter::once(None))
        .collect();

    let mut windows = Vec::with_capacity(releases.len());
    for (release, after) in releases.into_iter().zip(bounds) {
        if since.is_some_and(|boundary| release.published_at <= boundary) {
            warn!(tag = %release.tag, "release published before start date, skipping");
            continue;
        }
        debug!(tag = %release.tag, after = ?after, "window built");
        windows.push(ReleaseWindow { release, after });
    }

    Ok(windows)
}
