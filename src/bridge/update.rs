//! Update decision and update-cache patching.

use super::Bridge;
use crate::host::{PluginIdentity, UpdateCache, UpdateOffer};
use crate::release::ReleaseRecord;
use crate::settings::first_non_empty;
use crate::version;

impl Bridge {
    /// Inserts an update offer for this plugin into `cache` when the newest
    /// release is strictly newer than the installed version recorded in
    /// `cache.checked`.
    pub fn check_for_update(&self, mut cache: UpdateCache) -> UpdateCache {
        if cache.checked.is_empty() {
            return cache;
        }

        let Some(identity) = self.identity.get() else {
            tracing::warn!("Update check before plugin identity is known");
            return cache;
        };

        let Some(installed) = cache.checked.get(&identity.basename) else {
            tracing::debug!("{} not in checked versions", identity.basename);
            return cache;
        };

        let Some(release) = self.releases.get() else {
            return cache;
        };

        if !version::is_newer(&release.tag_name, installed) {
            tracing::debug!(
                "{} is up to date ({} >= {})",
                identity.basename,
                installed,
                release.tag_name
            );
            return cache;
        }

        tracing::info!(
            "Update available for {}: {} -> {}",
            identity.basename,
            installed,
            release.tag_name
        );
        let offer = self.update_offer(identity, release);
        cache.response.insert(identity.basename.clone(), offer);
        cache
    }

    /// Builds the update offer for `release`.
    #[must_use]
    pub fn update_offer(&self, identity: &PluginIdentity, release: &ReleaseRecord) -> UpdateOffer {
        let meta = &release.metadata;

        UpdateOffer {
            url: identity.data.plugin_uri.clone(),
            slug: identity.slug().to_string(),
            plugin: identity.basename.clone(),
            package: release.package_url.clone(),
            new_version: release.tag_name.clone(),
            tested: first_non_empty(&[&meta.tested, &self.settings.tested]),
            requires_php: meta.requires_php.clone(),
            icons: meta.icons.clone(),
            banners: meta.banners.clone().or_else(|| self.settings.banners.clone()),
        }
    }
}
