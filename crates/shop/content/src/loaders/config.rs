//! Shop configuration loader.

use std::path::Path;

use shop_core::ShopConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for shop configuration from TOML files.
///
/// Missing keys fall back to the plugin defaults:
///
/// ```toml
/// default_price = 100
/// requirements_text = "Requirements"
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing ShopConfig
    pub fn load(path: &Path) -> LoadResult<ShopConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ShopConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}
