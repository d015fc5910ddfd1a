//! Configuration for the release bridge.
//!
//! Loaded from `~/.relbridge.toml` by default. A commented template is
//! written there on first use.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{BridgeError, Result};
use crate::logging::LogConfig;
use crate::metadata::RepoLocation;
use crate::release::github::DEFAULT_API_BASE;
use crate::settings::Settings;

/// Environment variable overriding `source.access_token`.
pub const ACCESS_TOKEN_ENV: &str = "RELBRIDGE_ACCESS_TOKEN";

/// Environment variable overriding `logging.level`.
pub const LOG_LEVEL_ENV: &str = "RELBRIDGE_LOG";

/// Default web frontend of the hosting service.
pub const DEFAULT_WEB_BASE: &str = "https://github.com";

/// Template written when no config file exists.
const DEFAULT_CONFIG: &str = r#"# relbridge configuration

[source]
# Repository publishing the plugin's releases.
owner = ""
repository = ""
# access_token = ""
# api_base_url = "https://api.github.com"
# web_base_url = "https://github.com"

[plugin]
# Main plugin file and the directory the host keeps plugins in.
file = ""
plugins_dir = ""
# Basenames of active plugins, e.g. ["my-plugin/my-plugin.php"].
active = []

[settings]
# requires = "5.4"
# tested = "6.3"
# rating = "100.0"
# num_ratings = "10"
# downloaded = "10"
# added = "2023-10-03"
# Banner links used when a release has none, or false for no banners.
banners = false

[logging]
# enabled = true
# level = "info"
# retention_hours = 24
# directory = "/var/log/relbridge"
"#;

/// Release feed location and credentials.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repository: String,
    /// Access token appended to API and package URLs.
    pub access_token: Option<String>,
    /// REST API base URL.
    pub api_base_url: String,
    /// Web frontend base URL (icon and banner links).
    pub web_base_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repository: String::new(),
            access_token: None,
            api_base_url: DEFAULT_API_BASE.to_string(),
            web_base_url: DEFAULT_WEB_BASE.to_string(),
        }
    }
}

/// Installed plugin as seen by the local host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Main plugin file.
    pub file: PathBuf,
    /// Directory holding all plugins; basenames are relative to it.
    pub plugins_dir: PathBuf,
    /// Basenames of active plugins.
    pub active: Vec<String>,
}

/// Complete bridge configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub source: SourceConfig,
    pub plugin: PluginConfig,
    pub settings: Settings,
    pub logging: LogConfig,
    /// Path the config was loaded from.
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl BridgeConfig {
    /// Returns the default config file path (~/.relbridge.toml).
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".relbridge.toml")
    }

    /// Loads configuration from the default path, creating it if it doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_config_path())
    }

    /// Loads configuration from a specific path, creating it if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            Self::create_default_config(path)?;
        }

        let content = fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        config.config_path = path.to_path_buf();
        config.apply_env();
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Writes the commented template.
    fn create_default_config(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_CONFIG)?;
        tracing::info!("Created default config at {}", path.display());
        Ok(())
    }

    /// Applies environment overrides.
    fn apply_env(&mut self) {
        if let Ok(token) = env::var(ACCESS_TOKEN_ENV) {
            if !token.trim().is_empty() {
                self.source.access_token = Some(token.trim().to_string());
            }
        }
        if let Ok(level) = env::var(LOG_LEVEL_ENV) {
            self.logging.level = LogConfig::parse_level(&level);
        }
    }

    /// Checks that the config can drive a bridge.
    pub fn validate(&self) -> Result<()> {
        if self.source.owner.trim().is_empty() {
            return Err(BridgeError::Config("source.owner is empty".to_string()));
        }
        if self.source.repository.trim().is_empty() {
            return Err(BridgeError::Config("source.repository is empty".to_string()));
        }
        if self.plugin.file.as_os_str().is_empty() {
            return Err(BridgeError::Config("plugin.file is empty".to_string()));
        }
        Ok(())
    }

    /// Repository location used to resolve icon and banner links.
    #[must_use]
    pub fn location(&self) -> RepoLocation {
        RepoLocation {
            web_base: self.source.web_base_url.clone(),
            owner: self.source.owner.clone(),
            repository: self.source.repository.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[source]
owner = "acme"
repository = "widget"
access_token = "t0k"

[plugin]
file = "/srv/plugins/widget/widget.php"
plugins_dir = "/srv/plugins"
active = ["widget/widget.php"]

[settings]
tested = "6.5"

[logging]
level = "debug"
"#;

    #[test]
    fn test_parse_sample() {
        let config = BridgeConfig::parse(SAMPLE).unwrap();
        assert_eq!(config.source.owner, "acme");
        assert_eq!(config.source.repository, "widget");
        assert_eq!(config.source.access_token.as_deref(), Some("t0k"));
        assert_eq!(config.source.api_base_url, DEFAULT_API_BASE);
        assert_eq!(config.plugin.active, vec!["widget/widget.php"]);
        assert_eq!(config.settings.tested, "6.5");
        assert_eq!(config.settings.requires, "5.4");
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_template_parses() {
        let config = BridgeConfig::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.settings, Settings::default());
        assert!(matches!(config.validate(), Err(BridgeError::Config(_))));
    }

    #[test]
    fn test_load_creates_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("relbridge.toml");

        let config = BridgeConfig::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.config_path, path);
        assert!(config.source.owner.is_empty());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            BridgeConfig::parse("[source\nowner="),
            Err(BridgeError::TomlDe(_))
        ));
    }

    #[test]
    fn test_location() {
        let config = BridgeConfig::parse(SAMPLE).unwrap();
        let location = config.location();
        assert_eq!(
            location.asset_url("/raw/main/icon.png"),
            "https://github.com/acme/widget/raw/main/icon.png"
        );
    }
}
