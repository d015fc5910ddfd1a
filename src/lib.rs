//! relbridge
//!
//! Offers a self-hosted plugin for in-place upgrade through its host
//! application's update flow, using a GitHub repository's releases as the
//! update source.
//!
//! # Architecture
//!
//! - **Release Module**: fetches and memoizes the newest release
//! - **Metadata Module**: decomposes the release body into structured fields
//! - **Bridge Module**: update decision, details popup, post-install relocation
//! - **Host Module**: interfaces the host application implements and invokes
//!
//! # Usage
//!
//! ```no_run
//! use relbridge::config::BridgeConfig;
//! use relbridge::host::{HookRegistry, UpdateCache};
//! use relbridge::Bridge;
//!
//! let config = BridgeConfig::load().expect("Failed to load config");
//! let mut hooks = HookRegistry::new();
//! hooks.register(Box::new(Bridge::from_config(&config).expect("Invalid config")));
//! hooks.host_ready().expect("Failed to read plugin identity");
//!
//! let cache = hooks.update_check(UpdateCache::default());
//! println!("{} update(s) offered", cache.response.len());
//! ```

#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

pub mod bridge;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod metadata;
pub mod release;
pub mod settings;
pub mod version;

// Re-export main types
pub use bridge::Bridge;
pub use config::BridgeConfig;
pub use error::{BridgeError, Result};
pub use host::{HookRegistry, UpdateHooks};
pub use release::{ReleaseRecord, ReleaseSource};
pub use settings::Settings;
