//! Shared fixtures for bridge integration tests.
//!
//! Provides an in-memory release source, plugin registry and file system
//! so host callbacks can be driven without network access.

#![allow(dead_code, clippy::expect_used, clippy::unwrap_used)]

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use relbridge::error::{BridgeError, Result};
use relbridge::host::{HostFilesystem, PluginData, PluginRegistry};
use relbridge::metadata::RepoLocation;
use relbridge::release::{ReleaseRecord, ReleaseSource};
use relbridge::{Bridge, Settings};

pub const BASENAME: &str = "widget/widget.php";
pub const PLUGIN_FILE: &str = "/srv/plugins/widget/widget.php";

/// Release body exercising every recognized label.
pub const FULL_BODY: &str = "Name: Widget Pro
Tested: 6.4
RequiresPHP: 7.4
Rating: 96.0
NumRatings: 42
Downloaded: 1200
Description: Adds widgets.
Author: Acme
AuthorProfile: https://acme.test
Homepage: https://acme.test/widget
Icons: 1x|/raw/main/assets/icon-128.png,2x|/raw/main/assets/icon-256.png
Banners: low|/raw/main/assets/banner-772.png
|||
* Added more widgets";

/// Release source returning a fixed answer and counting calls.
pub struct StaticSource {
    pub calls: Rc<Cell<usize>>,
    pub answer: std::result::Result<Option<ReleaseRecord>, String>,
}

impl ReleaseSource for StaticSource {
    fn latest_release(&self) -> Result<Option<ReleaseRecord>> {
        self.calls.set(self.calls.get() + 1);
        self.answer.clone().map_err(BridgeError::Config)
    }
}

/// Registry reporting a single plugin and recording activations.
pub struct MemoryRegistry {
    pub data: PluginData,
    pub active: bool,
    pub activations: Rc<RefCell<Vec<String>>>,
}

impl PluginRegistry for MemoryRegistry {
    fn plugin_data(&self, _file: &Path) -> Result<PluginData> {
        Ok(self.data.clone())
    }

    fn plugin_basename(&self, _file: &Path) -> String {
        BASENAME.to_string()
    }

    fn is_active(&self, _basename: &str) -> bool {
        self.active
    }

    fn activate(&self, basename: &str) -> Result<()> {
        self.activations.borrow_mut().push(basename.to_string());
        Ok(())
    }
}

/// File system recording moves instead of touching the disk.
#[derive(Default)]
pub struct RecordingFilesystem {
    pub moves: Rc<RefCell<Vec<(PathBuf, PathBuf, bool)>>>,
}

impl HostFilesystem for RecordingFilesystem {
    fn move_dir(&self, from: &Path, to: &Path, overwrite: bool) -> Result<()> {
        self.moves
            .borrow_mut()
            .push((from.to_path_buf(), to.to_path_buf(), overwrite));
        Ok(())
    }
}

/// Handles for inspecting a fixture bridge.
pub struct Fixture {
    pub bridge: Bridge,
    pub calls: Rc<Cell<usize>>,
    pub activations: Rc<RefCell<Vec<String>>>,
    pub moves: Rc<RefCell<Vec<(PathBuf, PathBuf, bool)>>>,
}

pub fn plugin_data(version: &str) -> PluginData {
    PluginData {
        name: "Widget".to_string(),
        plugin_uri: "https://acme.test/widget-plugin".to_string(),
        version: version.to_string(),
        description: "Host-side description.".to_string(),
        author: "Acme Inc".to_string(),
        author_uri: "https://acme.test/about".to_string(),
    }
}

pub fn release(tag: &str, body: &str) -> ReleaseRecord {
    ReleaseRecord {
        tag_name: tag.to_string(),
        package_url: format!("https://api.github.com/repos/acme/widget/zipball/{}", tag),
        published_at: Some("2024-01-15T10:30:00Z".to_string()),
        body: body.to_string(),
        metadata: Default::default(),
    }
}

/// Builds a bridge over in-memory host services.
pub fn fixture(
    answer: std::result::Result<Option<ReleaseRecord>, String>,
    installed: &str,
    active: bool,
    settings: Settings,
) -> Fixture {
    let calls = Rc::new(Cell::new(0));
    let activations = Rc::new(RefCell::new(Vec::new()));
    let moves = Rc::new(RefCell::new(Vec::new()));

    let source = StaticSource {
        calls: Rc::clone(&calls),
        answer,
    };
    let registry = MemoryRegistry {
        data: plugin_data(installed),
        active,
        activations: Rc::clone(&activations),
    };
    let filesystem = RecordingFilesystem {
        moves: Rc::clone(&moves),
    };

    let bridge = Bridge::new(
        PLUGIN_FILE,
        RepoLocation::github("acme", "widget"),
        settings,
        Box::new(source),
        Box::new(registry),
        Box::new(filesystem),
    );

    Fixture {
        bridge,
        calls,
        activations,
        moves,
    }
}
