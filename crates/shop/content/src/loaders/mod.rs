//! Content loaders for reading host project files.

pub mod config;
pub mod database;
pub mod factory;
pub mod parameters;

pub use config::ConfigLoader;
pub use database::DatabaseLoader;
pub use factory::{ContentFactory, ShopContent};
pub use parameters::{ParameterLoader, PluginEntry, config_from_parameters};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents. Strips a leading byte-order mark,
/// which some host editors write.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))?;
    Ok(match content.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => content,
    })
}
