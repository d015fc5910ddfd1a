//! Plugin registry backed by a plugins directory on disk.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::{PluginData, PluginRegistry};
use crate::error::Result;
use crate::metadata::read_headers;

/// Header labels of an installed plugin's main file.
const PLUGIN_LABELS: &[&str] = &[
    "Plugin Name",
    "Plugin URI",
    "Version",
    "Description",
    "Author",
    "Author URI",
];

/// Registry for plugins living under a single directory.
pub struct LocalPluginRegistry {
    plugins_dir: PathBuf,
    active: RefCell<BTreeSet<String>>,
}

impl LocalPluginRegistry {
    /// Creates a registry rooted at `plugins_dir` with the given active basenames.
    pub fn new(plugins_dir: impl Into<PathBuf>, active: impl IntoIterator<Item = String>) -> Self {
        Self {
            plugins_dir: plugins_dir.into(),
            active: RefCell::new(active.into_iter().collect()),
        }
    }

    /// Basenames currently marked active.
    #[must_use]
    pub fn active_plugins(&self) -> Vec<String> {
        self.active.borrow().iter().cloned().collect()
    }
}

impl PluginRegistry for LocalPluginRegistry {
    fn plugin_data(&self, file: &Path) -> Result<PluginData> {
        let headers = read_headers(file, PLUGIN_LABELS)?;
        let get = |label: &str| headers.get(label).cloned().unwrap_or_default();

        Ok(PluginData {
            name: get("Plugin Name"),
            plugin_uri: get("Plugin URI"),
            version: get("Version"),
            description: get("Description"),
            author: get("Author"),
            author_uri: get("Author URI"),
        })
    }

    fn plugin_basename(&self, file: &Path) -> String {
        match file.strip_prefix(&self.plugins_dir) {
            Ok(relative) => relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    fn is_active(&self, basename: &str) -> bool {
        self.active.borrow().contains(basename)
    }

    fn activate(&self, basename: &str) -> Result<()> {
        tracing::info!("Activating plugin {}", basename);
        self.active.borrow_mut().insert(basename.to_string());
        Ok(())
    }
}
