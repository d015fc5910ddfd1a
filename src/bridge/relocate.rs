//! Post-install relocation.

use super::Bridge;
use crate::error::{BridgeError, Result};
use crate::host::{HookExtra, InstallResult};

impl Bridge {
    /// Moves the extracted package into the plugin's install directory and
    /// re-activates the plugin if it was active before the update.
    ///
    /// Failed installs (`response == false`) and installs the host attributes
    /// to a different plugin are passed through.
    pub fn relocate(
        &self,
        response: bool,
        hook_extra: &HookExtra,
        mut result: InstallResult,
    ) -> Result<InstallResult> {
        if !response {
            tracing::debug!("Install reported failure; leaving {}", result.destination.display());
            return Ok(result);
        }

        if let Some(plugin) = &hook_extra.plugin {
            let ours = match self.identity.get() {
                Some(identity) => plugin == &identity.basename,
                None => plugin == &self.registry.plugin_basename(&self.plugin_file),
            };
            if !ours {
                return Ok(result);
            }
        }

        let identity = self.identity.get().ok_or(BridgeError::MissingIdentity)?;

        let install_dir = identity.install_dir().to_path_buf();
        tracing::info!(
            "Relocating {} -> {}",
            result.destination.display(),
            install_dir.display()
        );
        self.filesystem
            .move_dir(&result.destination, &install_dir, true)?;

        result.destination_name = install_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        result.destination = install_dir;

        if identity.active {
            self.registry.activate(&identity.basename)?;
        }

        Ok(result)
    }
}
