//! Release feed access and per-lifetime memoization.

pub mod github;

use std::cell::OnceCell;

use serde::Serialize;

use crate::error::Result;
use crate::metadata::{self, ReleaseMetadata, RepoLocation};

pub use github::GitHubReleaseSource;

/// Newest published release of the plugin repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseRecord {
    /// Release tag, used as the version string.
    pub tag_name: String,
    /// Package download URL (access token appended when configured).
    pub package_url: String,
    /// Publish timestamp (RFC 3339).
    pub published_at: Option<String>,
    /// Free-text release body.
    pub body: String,
    /// Fields recovered from the body.
    pub metadata: ReleaseMetadata,
}

/// Provider of the newest release.
pub trait ReleaseSource {
    /// Fetches the newest release, `Ok(None)` if the feed holds nothing usable.
    fn latest_release(&self) -> Result<Option<ReleaseRecord>>;
}

/// Observable state of a [`ReleaseCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// No fetch attempted yet.
    Unfetched,
    /// Fetch attempted; nothing usable came back.
    Unavailable,
    /// Fetch succeeded.
    Available,
}

/// Fetches the release at most once and hands out the same record afterwards.
pub struct ReleaseCache {
    source: Box<dyn ReleaseSource>,
    location: RepoLocation,
    cell: OnceCell<Option<ReleaseRecord>>,
}

impl ReleaseCache {
    /// Creates an empty cache over `source`. Asset links in the body are
    /// resolved against `location`.
    pub fn new(source: Box<dyn ReleaseSource>, location: RepoLocation) -> Self {
        Self {
            source,
            location,
            cell: OnceCell::new(),
        }
    }

    /// Current cache state.
    #[must_use]
    pub fn status(&self) -> CacheStatus {
        match self.cell.get() {
            None => CacheStatus::Unfetched,
            Some(None) => CacheStatus::Unavailable,
            Some(Some(_)) => CacheStatus::Available,
        }
    }

    /// Returns the release, fetching it on first use.
    pub fn get(&self) -> Option<&ReleaseRecord> {
        self.cell.get_or_init(|| self.load()).as_ref()
    }

    fn load(&self) -> Option<ReleaseRecord> {
        let mut release = match self.source.latest_release() {
            Ok(Some(release)) => release,
            Ok(None) => {
                tracing::warn!(
                    "No release found for {}/{}",
                    self.location.owner,
                    self.location.repository
                );
                return None;
            }
            Err(e) => {
                tracing::warn!("Release fetch failed: {}", e);
                return None;
            }
        };

        match metadata::extract(&release.body, &self.location) {
            Ok(meta) => release.metadata = meta,
            Err(e) => tracing::warn!("Failed to extract release metadata: {}", e),
        }

        tracing::info!("Latest release: {}", release.tag_name);
        Some(release)
    }
}
