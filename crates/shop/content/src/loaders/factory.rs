//! Content factory for building the shop side-table from a host project.

use std::path::{Path, PathBuf};

use shop_core::{CostRegistry, Database, EntryKind, ShopConfig};

use crate::loaders::{ConfigLoader, DatabaseLoader, LoadResult, ParameterLoader};

/// Database and parsed notetag side-table of one project.
#[derive(Clone, Debug)]
pub struct ShopContent {
    pub database: Database,
    pub registry: CostRegistry,
}

/// Content factory that loads a host project directory.
///
/// # Directory Structure
///
/// ```text
/// project_dir/
/// ├── shop.toml          (optional, overrides plugin parameters)
/// ├── js/
/// │   └── plugins.js
/// └── data/
///     ├── Items.json
///     ├── Weapons.json
///     ├── Armors.json
///     ├── Skills.json
///     └── States.json
/// ```
pub struct ContentFactory {
    project_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "shop.toml";

    /// Creates a new content factory pointing to a project directory.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    /// Returns the project directory path.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.project_dir.join("data")
    }

    pub fn plugins_path(&self) -> PathBuf {
        self.project_dir.join("js").join("plugins.js")
    }

    /// Load database tables from `data/`.
    pub fn load_database(&self) -> LoadResult<Database> {
        DatabaseLoader::load(&self.data_dir())
    }

    /// Resolve shop configuration.
    ///
    /// Precedence: `shop.toml`, then the `YED_SkillShop` entry of
    /// `js/plugins.js`, then built-in defaults.
    pub fn load_config(&self) -> LoadResult<ShopConfig> {
        let override_path = self.project_dir.join(Self::CONFIG_FILE);
        if override_path.exists() {
            tracing::info!("Using shop config from {}", override_path.display());
            return ConfigLoader::load(&override_path);
        }

        let plugins_path = self.plugins_path();
        if plugins_path.exists() {
            let plugins = ParameterLoader::load(&plugins_path)?;
            if let Some(config) = ParameterLoader::shop_config(&plugins) {
                tracing::info!("Using shop config from {}", plugins_path.display());
                return Ok(config);
            }
            tracing::warn!(
                "{} has no enabled {} entry, using defaults",
                plugins_path.display(),
                ShopConfig::PLUGIN_NAME
            );
        }

        Ok(ShopConfig::default())
    }

    /// Load everything and scan every note field into a registry.
    pub fn load(&self) -> LoadResult<ShopContent> {
        let config = self.load_config()?;
        let database = self.load_database()?;
        let registry = CostRegistry::build(&database, config);

        tracing::info!(
            "Processed notetags for {} entries ({} skills, {} items, {} states)",
            registry.len(),
            registry.count(EntryKind::Skill),
            registry.count(EntryKind::Item),
            registry.count(EntryKind::State),
        );

        Ok(ShopContent { database, registry })
    }
}
