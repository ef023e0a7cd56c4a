//! Loaders for host project data.
//!
//! This crate reads a host game project from disk and feeds it to `shop-core`:
//! - Database tables (`data/Items.json`, `data/Skills.json`, ...)
//! - Plugin parameters (`js/plugins.js`, entry `YED_SkillShop`)
//! - Optional shop configuration override (`shop.toml`)
//!
//! Parsed notetags end up in a [`shop_core::CostRegistry`] side-table; the
//! loaded database records themselves are never modified.

pub mod loaders;

pub use loaders::{
    ConfigLoader, ContentFactory, DatabaseLoader, LoadResult, ParameterLoader, PluginEntry,
    ShopContent, config_from_parameters,
};
