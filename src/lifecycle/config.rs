//! Shop configuration, read from an optional JSON file.
//!
//! Every field has a default, so a partial file (or none at all) is fine:
//!
//! ```json
//! { "catalog_path": "scraped_data.json", "submit_delay_ms": 500 }
//! ```

use crate::catalog::PLACEHOLDER_IMAGE;
use crate::model::QuickItem;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    /// Catalog document; a missing or broken file falls back to the built-in menu.
    pub catalog_path: PathBuf,
    pub placeholder_image: String,
    /// Capacity of the cart actor's mailbox.
    pub channel_buffer: usize,
    pub submit_delay_ms: u64,
    pub newsletter_delay_ms: u64,
    pub quick_items: Vec<QuickItem>,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("scraped_data.json"),
            placeholder_image: PLACEHOLDER_IMAGE.to_string(),
            channel_buffer: 32,
            submit_delay_ms: 2000,
            newsletter_delay_ms: 1500,
            quick_items: QuickItem::house_specials(),
        }
    }
}

impl ShopConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Reads `path` if it exists; otherwise, or if it cannot be used, the
    /// defaults apply.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Config unusable, using defaults");
                Self::default()
            }
        }
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn newsletter_delay(&self) -> Duration {
        Duration::from_millis(self.newsletter_delay_ms)
    }

    /// Looks up a configured quick item by name.
    pub fn quick_item(&self, name: &str) -> Option<&QuickItem> {
        self.quick_items.iter().find(|item| item.name == name)
    }
}
