//! GitHub releases feed client.

use reqwest::Url;
use serde::Deserialize;

use super::{ReleaseRecord, ReleaseSource};
use crate::error::{BridgeError, Result};

/// Default GitHub REST API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Release entry as returned by the releases list endpoint.
#[derive(Debug, Deserialize)]
struct GitHubRelease {
    tag_name: String,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    zipball_url: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
}

/// Reads the newest release of `owner/repository` from GitHub.
pub struct GitHubReleaseSource {
    /// HTTP client for API requests.
    client: reqwest::blocking::Client,
    owner: String,
    repository: String,
    access_token: Option<String>,
    api_base: String,
}

impl GitHubReleaseSource {
    /// Creates a client for `owner/repository` on api.github.com.
    #[must_use]
    pub fn new(owner: &str, repository: &str, access_token: Option<&str>) -> Self {
        Self::with_api_base(owner, repository, access_token, DEFAULT_API_BASE)
    }

    /// Creates a client against a custom API base (mock servers, GitHub Enterprise).
    #[must_use]
    pub fn with_api_base(
        owner: &str,
        repository: &str,
        access_token: Option<&str>,
        api_base: &str,
    ) -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("relbridge/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());

        Self {
            client,
            owner: owner.to_string(),
            repository: repository.to_string(),
            access_token: access_token
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// URL of the releases list endpoint, with the access token if configured.
    pub fn releases_url(&self) -> Result<Url> {
        let url = format!(
            "{}/repos/{}/{}/releases",
            self.api_base, self.owner, self.repository
        );
        self.authorize(&url)
    }

    /// Appends the access token to `url` as a query parameter.
    fn authorize(&self, url: &str) -> Result<Url> {
        let mut url = Url::parse(url)
            .map_err(|e| BridgeError::Config(format!("Invalid URL {}: {}", url, e)))?;
        if let Some(token) = &self.access_token {
            url.query_pairs_mut().append_pair("access_token", token);
        }
        Ok(url)
    }

    /// Decodes a releases list response and converts its newest entry.
    ///
    /// Anything other than a non-empty JSON array yields `None`.
    pub fn parse_releases(&self, text: &str) -> Result<Option<ReleaseRecord>> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let Some(first) = value.as_array().and_then(|list| list.first()) else {
            return Ok(None);
        };

        let release: GitHubRelease = serde_json::from_value(first.clone())?;
        let package_url = match release.zipball_url.as_deref() {
            Some(url) => self.authorize(url)?.to_string(),
            None => String::new(),
        };

        Ok(Some(ReleaseRecord {
            tag_name: release.tag_name,
            package_url,
            published_at: release.published_at,
            body: release.body.unwrap_or_default(),
            metadata: Default::default(),
        }))
    }
}

impl ReleaseSource for GitHubReleaseSource {
    fn latest_release(&self) -> Result<Option<ReleaseRecord>> {
        let url = self.releases_url()?;
        tracing::debug!(
            "Fetching releases for {}/{}",
            self.owner,
            self.repository
        );

        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json")
            .send()?;

        tracing::debug!("Release feed responded with {}", response.status());
        let text = response.text()?;
        self.parse_releases(&text)
    }
}
