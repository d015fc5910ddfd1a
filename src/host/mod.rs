//! Host application interfaces.
//!
//! The host drives the bridge through [`UpdateHooks`] at fixed lifecycle
//! points and provides plugin registry and file-system services through
//! [`PluginRegistry`] and [`HostFilesystem`].

pub mod fs;
pub mod local;
pub mod types;

use std::path::Path;

use crate::error::Result;

pub use fs::LocalFilesystem;
pub use local::LocalPluginRegistry;
pub use types::{
    DetailSections, HookExtra, InfoResult, InstallResult, PLUGIN_INFORMATION, PluginData,
    PluginDetails, PluginIdentity, PluginInfoArgs, UpdateCache, UpdateOffer, slug_of,
};

/// Host-side knowledge about installed plugins.
pub trait PluginRegistry {
    /// Reads the header data of a plugin file.
    fn plugin_data(&self, file: &Path) -> Result<PluginData>;

    /// Host-relative identifier of a plugin file.
    fn plugin_basename(&self, file: &Path) -> String;

    /// Whether the plugin with `basename` is active.
    fn is_active(&self, basename: &str) -> bool;

    /// Activates the plugin with `basename`.
    fn activate(&self, basename: &str) -> Result<()>;
}

/// Host file-system abstraction used after package extraction.
pub trait HostFilesystem {
    /// Moves the directory tree at `from` to `to`.
    ///
    /// With `overwrite`, existing contents at `to` are replaced.
    fn move_dir(&self, from: &Path, to: &Path, overwrite: bool) -> Result<()>;
}

/// Callbacks the host invokes on a registered update handler.
pub trait UpdateHooks {
    /// The host's plugin registry is ready.
    fn on_host_ready(&self) -> Result<()>;

    /// Periodic update check. Returns the (possibly patched) update cache.
    fn filter_update_cache(&self, cache: UpdateCache) -> UpdateCache;

    /// Extended plugin information request.
    fn filter_plugin_info(&self, result: InfoResult, action: &str, args: &PluginInfoArgs)
    -> InfoResult;

    /// Runs after the host's installer extracted a package.
    fn after_install(
        &self,
        response: bool,
        hook_extra: &HookExtra,
        result: InstallResult,
    ) -> Result<InstallResult>;
}

/// Ordered set of registered update handlers.
///
/// Filter callbacks are chained: each handler receives the previous
/// handler's output.
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Box<dyn UpdateHooks>>,
}

impl HookRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler.
    pub fn register(&mut self, hooks: Box<dyn UpdateHooks>) {
        self.hooks.push(hooks);
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns true if no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Notifies all handlers that the host is ready.
    ///
    /// Every handler is notified even if an earlier one fails; the first
    /// error is returned.
    pub fn host_ready(&self) -> Result<()> {
        let mut first_error = None;
        for hooks in &self.hooks {
            if let Err(e) = hooks.on_host_ready() {
                tracing::warn!("Update handler failed on host ready: {}", e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Runs the update-check chain.
    #[must_use]
    pub fn update_check(&self, cache: UpdateCache) -> UpdateCache {
        self.hooks
            .iter()
            .fold(cache, |cache, hooks| hooks.filter_update_cache(cache))
    }

    /// Runs the details chain starting from `default`.
    #[must_use]
    pub fn plugin_info(&self, default: InfoResult, action: &str, args: &PluginInfoArgs) -> InfoResult {
        self.hooks
            .iter()
            .fold(default, |result, hooks| hooks.filter_plugin_info(result, action, args))
    }

    /// Runs the post-install chain.
    pub fn post_install(
        &self,
        response: bool,
        hook_extra: &HookExtra,
        result: InstallResult,
    ) -> Result<InstallResult> {
        self.hooks
            .iter()
            .try_fold(result, |result, hooks| hooks.after_install(response, hook_extra, result))
    }
}
