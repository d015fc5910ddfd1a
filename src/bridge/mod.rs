//! The update bridge.
//!
//! Connects one installed plugin to its repository's release feed and
//! answers the host's update callbacks for it.

mod details;
mod relocate;
mod update;

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use crate::config::BridgeConfig;
use crate::error::Result;
use crate::host::{
    HookExtra, HostFilesystem, InfoResult, InstallResult, LocalFilesystem, LocalPluginRegistry,
    PluginIdentity, PluginInfoArgs, PluginRegistry, UpdateCache, UpdateHooks,
};
use crate::metadata::RepoLocation;
use crate::release::{CacheStatus, GitHubReleaseSource, ReleaseCache, ReleaseRecord, ReleaseSource};
use crate::settings::Settings;

/// Update bridge for a single plugin.
pub struct Bridge {
    /// Main plugin file.
    plugin_file: PathBuf,
    /// Repository the releases come from.
    location: RepoLocation,
    /// Integrator defaults.
    settings: Settings,
    /// Memoized newest release.
    releases: ReleaseCache,
    /// Host plugin registry.
    registry: Box<dyn PluginRegistry>,
    /// Host file system.
    filesystem: Box<dyn HostFilesystem>,
    /// Populated once the host is ready.
    identity: OnceCell<PluginIdentity>,
}

impl Bridge {
    /// Creates a bridge from its parts.
    pub fn new(
        plugin_file: impl Into<PathBuf>,
        location: RepoLocation,
        settings: Settings,
        source: Box<dyn ReleaseSource>,
        registry: Box<dyn PluginRegistry>,
        filesystem: Box<dyn HostFilesystem>,
    ) -> Self {
        Self {
            plugin_file: plugin_file.into(),
            releases: ReleaseCache::new(source, location.clone()),
            location,
            settings,
            registry,
            filesystem,
            identity: OnceCell::new(),
        }
    }

    /// Creates a bridge against GitHub and the local disk from a config.
    pub fn from_config(config: &BridgeConfig) -> Result<Self> {
        config.validate()?;

        let source = GitHubReleaseSource::with_api_base(
            &config.source.owner,
            &config.source.repository,
            config.source.access_token.as_deref(),
            &config.source.api_base_url,
        );
        let registry = LocalPluginRegistry::new(
            config.plugin.plugins_dir.clone(),
            config.plugin.active.iter().cloned(),
        );

        Ok(Self::new(
            config.plugin.file.clone(),
            config.location(),
            config.settings.clone(),
            Box::new(source),
            Box::new(registry),
            Box::new(LocalFilesystem),
        ))
    }

    /// Main plugin file.
    #[must_use]
    pub fn plugin_file(&self) -> &Path {
        &self.plugin_file
    }

    /// Repository the releases come from.
    #[must_use]
    pub fn location(&self) -> &RepoLocation {
        &self.location
    }

    /// Integrator defaults.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Plugin identity, once the host reported it.
    #[must_use]
    pub fn identity(&self) -> Option<&PluginIdentity> {
        self.identity.get()
    }

    /// Newest release, fetched on first use.
    pub fn release(&self) -> Option<&ReleaseRecord> {
        self.releases.get()
    }

    /// State of the release cache.
    #[must_use]
    pub fn release_status(&self) -> CacheStatus {
        self.releases.status()
    }

    /// Captures the plugin identity from the host registry.
    ///
    /// Only the first successful call has an effect.
    pub fn populate_identity(&self) -> Result<&PluginIdentity> {
        if let Some(identity) = self.identity.get() {
            return Ok(identity);
        }

        let data = self.registry.plugin_data(&self.plugin_file)?;
        let basename = self.registry.plugin_basename(&self.plugin_file);
        let active = self.registry.is_active(&basename);
        tracing::debug!("Plugin identity: {} (active: {})", basename, active);

        Ok(self.identity.get_or_init(|| PluginIdentity {
            file: self.plugin_file.clone(),
            basename,
            active,
            data,
        }))
    }
}

impl UpdateHooks for Bridge {
    fn on_host_ready(&self) -> Result<()> {
        self.populate_identity().map(|_| ())
    }

    fn filter_update_cache(&self, cache: UpdateCache) -> UpdateCache {
        self.check_for_update(cache)
    }

    fn filter_plugin_info(
        &self,
        result: InfoResult,
        action: &str,
        args: &PluginInfoArgs,
    ) -> InfoResult {
        self.plugin_details(result, action, args)
    }

    fn after_install(
        &self,
        response: bool,
        hook_extra: &HookExtra,
        result: InstallResult,
    ) -> Result<InstallResult> {
        self.relocate(response, hook_extra, result)
    }
}
