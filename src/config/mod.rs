//! Configuration for pipeline-previews
//!
//! Settings are read from a TOML file. Missing fields fall back to their
//! defaults, so an empty file is a valid configuration.
//!
//! # Config Location
//!
//! `load_or_default` looks in the platform-appropriate config directory
//! under `dev.hxyulin.pipeline-previews`:
//! - **Linux**: `~/.config/dev.hxyulin.pipeline-previews/previews.toml`
//! - **macOS**: `~/Library/Application Support/dev.hxyulin.pipeline-previews/previews.toml`
//! - **Windows**: `%APPDATA%\dev.hxyulin.pipeline-previews\previews.toml`
//!
//! # Example
//!
//! ```toml
//! event_queue_capacity = 512
//! verify_invariants = false
//! log_filter = "warn"
//! ```

use crate::error::{PreviewError, Result, ResultExt};
use crate::preview::DEFAULT_EVENT_QUEUE_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for config directories
pub const APP_ID: &str = "dev.hxyulin.pipeline-previews";

/// Config filename
pub const CONFIG_FILE: &str = "previews.toml";

/// Default tracing filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info,pipeline_previews=debug";

/// Get the path to the config file
pub fn config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID).join(CONFIG_FILE))
}

/// Settings for the preview sequencer and its event bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Capacity of the cross-thread event queue.
    pub event_queue_capacity: usize,
    /// Check the preview order after every mutation.
    pub verify_invariants: bool,
    /// Tracing filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            event_queue_capacity: DEFAULT_EVENT_QUEUE_CAPACITY,
            verify_invariants: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl PreviewConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(PreviewError::from)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load from the default location, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => {
                tracing::info!("Loaded preview config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load preview config: {}", e);
                Self::default()
            }
        }
    }

    /// Write the config as TOML, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.event_queue_capacity == 0 {
            return Err(PreviewError::Config(
                "event_queue_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
