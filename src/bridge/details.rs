//! Details popup descriptor.

use chrono::{DateTime, Utc};

use super::Bridge;
use crate::host::{
    DetailSections, InfoResult, PLUGIN_INFORMATION, PluginDetails, PluginIdentity, PluginInfoArgs,
};
use crate::release::ReleaseRecord;
use crate::settings::first_non_empty;

impl Bridge {
    /// Answers a details request for this plugin's slug; any other request
    /// passes `result` through unchanged.
    pub fn plugin_details(
        &self,
        result: InfoResult,
        action: &str,
        args: &PluginInfoArgs,
    ) -> InfoResult {
        if action != PLUGIN_INFORMATION || args.slug.is_empty() {
            return result;
        }

        let Some(identity) = self.identity.get() else {
            return result;
        };
        if args.slug != identity.slug() {
            return result;
        }

        match self.releases.get() {
            Some(release) => InfoResult::Details(Box::new(self.details(identity, release))),
            None => result,
        }
    }

    /// Builds the details descriptor. Release metadata wins over host plugin
    /// data, which wins over settings.
    #[must_use]
    pub fn details(&self, identity: &PluginIdentity, release: &ReleaseRecord) -> PluginDetails {
        let meta = &release.metadata;
        let data = &identity.data;
        let settings = &self.settings;

        PluginDetails {
            name: first_non_empty(&[&meta.name, &data.name]),
            slug: identity.slug().to_string(),
            version: release.tag_name.clone(),
            author: first_non_empty(&[&meta.author, &data.author]),
            author_profile: first_non_empty(&[&meta.author_profile, &data.author_uri]),
            homepage: first_non_empty(&[&meta.homepage, &data.plugin_uri]),
            requires: settings.requires.clone(),
            tested: first_non_empty(&[&meta.tested, &settings.tested]),
            requires_php: meta.requires_php.clone(),
            rating: first_non_empty(&[&meta.rating, &settings.rating]),
            num_ratings: first_non_empty(&[&meta.num_ratings, &settings.num_ratings]),
            downloaded: first_non_empty(&[&meta.downloaded, &settings.downloaded]),
            added: settings.added.clone(),
            last_updated: release
                .published_at
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_default(),
            sections: DetailSections {
                description: first_non_empty(&[&meta.description, &data.description]),
                changelog: meta.changelog.clone(),
            },
            download_link: release.package_url.clone(),
            icons: meta.icons.clone(),
            banners: meta.banners.clone().or_else(|| settings.banners.clone()),
        }
    }
}

/// Formats an RFC 3339 timestamp for display, keeping unparseable input as is.
fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
