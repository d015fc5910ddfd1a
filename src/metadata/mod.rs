//! Release body metadata extraction.
//!
//! A release body carries an optional header block of `Label: value` lines
//! followed by a free-form changelog separated by a literal `|||`:
//!
//! ```text
//! Tested: 6.4
//! RequiresPHP: 7.4
//! Icons: 1x|/raw/main/assets/icon-128.png,2x|/raw/main/assets/icon-256.png
//! |||
//! * Fixed the thing
//! ```

pub mod header;
pub mod scratch;

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;
pub use header::{parse_headers, read_headers};
pub use scratch::ScratchFile;

/// Delimiter between the header block and the changelog.
pub const CHANGELOG_DELIMITER: &str = "|||";

/// Header labels recognized in a release body.
pub const RELEASE_LABELS: &[&str] = &[
    "Tested",
    "Icons",
    "Banners",
    "RequiresPHP",
    "Name",
    "Rating",
    "NumRatings",
    "Downloaded",
    "Description",
    "Author",
    "AuthorProfile",
    "Homepage",
];

/// Label -> absolute URL mapping for icons or banners. `None` means the
/// field was absent and serializes as `false`.
pub type AssetLinks = Option<BTreeMap<String, String>>;

/// Serializes absent asset links as `false`.
pub fn serialize_links<S: Serializer>(links: &AssetLinks, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    match links {
        Some(map) => map.serialize(serializer),
        None => serializer.serialize_bool(false),
    }
}

/// Reads asset links written by [`serialize_links`]: a table, or `false`.
pub fn deserialize_links<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<AssetLinks, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Links {
        Flag(bool),
        Table(BTreeMap<String, String>),
    }

    match Links::deserialize(deserializer)? {
        Links::Table(map) => Ok(Some(map)),
        Links::Flag(false) => Ok(None),
        Links::Flag(true) => Err(D::Error::custom("asset links must be a table or false")),
    }
}

/// Location of a repository on the hosting service's web frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    /// Web base URL, e.g. `https://github.com`.
    pub web_base: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repository: String,
}

impl RepoLocation {
    /// Creates a location on github.com.
    #[must_use]
    pub fn github(owner: &str, repository: &str) -> Self {
        Self {
            web_base: "https://github.com".to_string(),
            owner: owner.to_string(),
            repository: repository.to_string(),
        }
    }

    /// Resolves a URL suffix against the repository.
    #[must_use]
    pub fn asset_url(&self, suffix: &str) -> String {
        format!(
            "{}/{}/{}{}",
            self.web_base.trim_end_matches('/'),
            self.owner,
            self.repository,
            suffix
        )
    }
}

/// Fields recovered from a release body. Absent labels are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseMetadata {
    pub tested: String,
    pub requires_php: String,
    pub name: String,
    pub rating: String,
    pub num_ratings: String,
    pub downloaded: String,
    pub description: String,
    pub author: String,
    pub author_profile: String,
    pub homepage: String,
    #[serde(serialize_with = "serialize_links")]
    pub icons: AssetLinks,
    #[serde(serialize_with = "serialize_links")]
    pub banners: AssetLinks,
    pub changelog: String,
}

/// Extracts metadata from a release body.
///
/// The body is staged in a [`ScratchFile`] which is removed before this
/// function returns.
pub fn extract(body: &str, location: &RepoLocation) -> Result<ReleaseMetadata> {
    let scratch = ScratchFile::create(body)?;
    let headers = read_headers(scratch.path(), RELEASE_LABELS)?;
    drop(scratch);

    Ok(from_headers(&headers, body, location))
}

/// Builds metadata from already scanned headers and the full body text.
#[must_use]
pub fn from_headers(
    headers: &std::collections::HashMap<String, String>,
    body: &str,
    location: &RepoLocation,
) -> ReleaseMetadata {
    let get = |label: &str| headers.get(label).cloned().unwrap_or_default();

    ReleaseMetadata {
        tested: get("Tested"),
        requires_php: get("RequiresPHP"),
        name: get("Name"),
        rating: get("Rating"),
        num_ratings: get("NumRatings"),
        downloaded: get("Downloaded"),
        description: get("Description"),
        author: get("Author"),
        author_profile: get("AuthorProfile"),
        homepage: get("Homepage"),
        icons: parse_asset_links(&get("Icons"), location),
        banners: parse_asset_links(&get("Banners"), location),
        changelog: split_changelog(body),
    }
}

/// Parses `label|suffix,label|suffix` into absolute URLs.
///
/// Returns `None` when the field is empty. Entries without a `|` are skipped.
#[must_use]
pub fn parse_asset_links(value: &str, location: &RepoLocation) -> AssetLinks {
    if value.trim().is_empty() {
        return None;
    }

    let links = value
        .split(',')
        .filter_map(|pair| {
            let (label, suffix) = pair.split_once('|')?;
            Some((label.trim().to_string(), location.asset_url(suffix.trim())))
        })
        .collect();

    Some(links)
}

/// Returns the changelog part of a body.
///
/// Only a body that splits into exactly two segments has a changelog.
#[must_use]
pub fn split_changelog(body: &str) -> String {
    let parts: Vec<&str> = body.split(CHANGELOG_DELIMITER).collect();
    if parts.len() == 2 {
        parts[1].trim().to_string()
    } else {
        String::new()
    }
}
