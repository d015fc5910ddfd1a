//! Data structures exchanged with the host application.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::metadata::{AssetLinks, serialize_links};

/// Action name the host uses when asking for a plugin's details.
pub const PLUGIN_INFORMATION: &str = "plugin_information";

/// Header data the host reports for an installed plugin file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginData {
    pub name: String,
    pub plugin_uri: String,
    pub version: String,
    pub description: String,
    pub author: String,
    pub author_uri: String,
}

/// The bridge's view of its own installed plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginIdentity {
    /// Main plugin file.
    pub file: PathBuf,
    /// Host-relative identifier, e.g. `my-plugin/my-plugin.php`.
    pub basename: String,
    /// Whether the plugin was active when the identity was captured.
    pub active: bool,
    /// Host-reported plugin data.
    pub data: PluginData,
}

impl PluginIdentity {
    /// Leading path segment of the basename.
    #[must_use]
    pub fn slug(&self) -> &str {
        slug_of(&self.basename)
    }

    /// Directory the plugin is installed in.
    #[must_use]
    pub fn install_dir(&self) -> &Path {
        self.file.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Leading path segment of a basename.
#[must_use]
pub fn slug_of(basename: &str) -> &str {
    basename.split('/').next().unwrap_or(basename)
}

/// Host's shared record of available updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateCache {
    /// Unix time of the last host-side check.
    pub last_checked: Option<i64>,
    /// Installed version per basename, as seen by the last check.
    pub checked: BTreeMap<String, String>,
    /// Available updates per basename.
    pub response: BTreeMap<String, UpdateOffer>,
}

/// An update offer inserted into the [`UpdateCache`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateOffer {
    pub url: String,
    pub slug: String,
    pub plugin: String,
    pub package: String,
    pub new_version: String,
    pub tested: String,
    pub requires_php: String,
    #[serde(serialize_with = "serialize_links")]
    pub icons: AssetLinks,
    #[serde(serialize_with = "serialize_links")]
    pub banners: AssetLinks,
}

/// Query arguments of a details request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginInfoArgs {
    pub slug: String,
}

impl PluginInfoArgs {
    #[must_use]
    pub fn for_slug(slug: &str) -> Self {
        Self {
            slug: slug.to_string(),
        }
    }
}

/// Result of a details request, threaded through all registered hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoResult {
    /// No hook produced details; the host falls back to its own lookup.
    NotHandled,
    /// Details for the requested plugin.
    Details(Box<PluginDetails>),
}

/// Tabs of the details popup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailSections {
    pub description: String,
    pub changelog: String,
}

/// Full descriptor shown in the host's details popup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PluginDetails {
    pub name: String,
    pub slug: String,
    pub version: String,
    pub author: String,
    pub author_profile: String,
    pub homepage: String,
    pub requires: String,
    pub tested: String,
    pub requires_php: String,
    pub rating: String,
    pub num_ratings: String,
    pub downloaded: String,
    pub added: String,
    pub last_updated: String,
    pub sections: DetailSections,
    pub download_link: String,
    #[serde(serialize_with = "serialize_links")]
    pub icons: AssetLinks,
    #[serde(serialize_with = "serialize_links")]
    pub banners: AssetLinks,
}

/// Context the host attaches to an install callback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookExtra {
    /// Basename of the plugin being installed, if the host knows it.
    pub plugin: Option<String>,
    /// Installer action, e.g. `update`.
    pub action: Option<String>,
}

/// Where the host's installer placed an extracted package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallResult {
    /// Extracted source directory.
    pub source: PathBuf,
    /// Current destination of the package files.
    pub destination: PathBuf,
    /// Directory name of the destination.
    pub destination_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_of() {
        assert_eq!(slug_of("my-plugin/my-plugin.php"), "my-plugin");
        assert_eq!(slug_of("single.php"), "single.php");
    }

    #[test]
    fn test_install_dir() {
        let identity = PluginIdentity {
            file: PathBuf::from("/plugins/demo/demo.php"),
            basename: "demo/demo.php".to_string(),
            active: false,
            data: PluginData::default(),
        };
        assert_eq!(identity.install_dir(), Path::new("/plugins/demo"));
        assert_eq!(identity.slug(), "demo");
    }
}
