//! Buy-cost notetags and skill shop logic shared across host integrations.
//!
//! `shop-core` turns the free-text note fields of database entries into
//! structured [`CostSpec`] records, keeps them in a side-table
//! ([`CostRegistry`]) instead of on the host's shared records, and resolves
//! them against the host's tables and live game state through the oracle
//! traits in [`database`]. Everything here is pure: parsing is a function of
//! `(note text, ShopConfig)`, and all I/O lives in `shop-content`.
pub mod config;
pub mod cost;
pub mod database;
pub mod error;
pub mod notetag;
pub mod registry;
pub mod resolve;
pub mod shop;

pub use config::ShopConfig;
pub use cost::{
    CostSpec, CostSpecBuilder, ItemCost, ItemKind, SwitchRequirement, VariableCost,
    VariableRequirement,
};
pub use database::{
    ActorId, Database, DatabaseEntry, DatabaseOracle, EntryId, EntryKey, EntryKind, MemoryStore,
    RuntimeOracle, RuntimeStore,
};
pub use error::{ErrorSeverity, ShopError};
pub use notetag::{Directive, parse_note};
pub use registry::{CostRegistry, EntryNotes};
pub use resolve::{
    CostLine, CostResolver, GoldStatus, ItemTotal, PurchaseCheck, ResolveError, SwitchStatus,
    VariableStatus,
};
pub use shop::{
    CommandError, Listing, OpenShopError, PluginCommand, PurchaseError, Receipt, SkillShop,
    purchase,
};
