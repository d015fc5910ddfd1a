//! Integrator-supplied display and compatibility defaults.
//!
//! These fill descriptor fields the release body and the host's plugin data
//! leave empty.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::metadata::{AssetLinks, deserialize_links, serialize_links};

/// Display/compatibility defaults merged into outgoing descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Minimum host version required.
    pub requires: String,
    /// Host version the plugin was tested against.
    pub tested: String,
    /// Rating percentage shown in the details popup.
    pub rating: String,
    /// Number of ratings.
    pub num_ratings: String,
    /// Download counter.
    pub downloaded: String,
    /// Date the plugin was first published.
    pub added: String,
    /// Banner links used when the release body has none.
    #[serde(serialize_with = "serialize_links", deserialize_with = "deserialize_links")]
    pub banners: AssetLinks,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            requires: "5.4".to_string(),
            tested: "6.3".to_string(),
            rating: "100.0".to_string(),
            num_ratings: "10".to_string(),
            downloaded: "10".to_string(),
            added: "2023-10-03".to_string(),
            banners: None,
        }
    }
}

impl Settings {
    /// Sets banner links (builder style).
    #[must_use]
    pub fn with_banners(mut self, banners: BTreeMap<String, String>) -> Self {
        self.banners = Some(banners);
        self
    }
}

/// Returns the first non-empty value.
pub(crate) fn first_non_empty<S: AsRef<str>>(candidates: &[S]) -> String {
    candidates
        .iter()
        .map(|s| s.as_ref().trim())
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}
