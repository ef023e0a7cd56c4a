//! Traits describing the host game's database and runtime stores.
//!
//! Oracles expose the read-only entry tables (items, weapons, armors, skills,
//! states) and the live variable, switch, gold and inventory stores. Shop
//! logic reads through these traits so it never depends on a concrete host,
//! and never writes fields onto the host's shared records.
mod entry;
mod store;
mod tables;

pub use entry::{DatabaseEntry, EntryId, EntryKey, EntryKind};
pub use store::{ActorId, MemoryStore, RuntimeOracle, RuntimeStore};
pub use tables::{Database, DatabaseOracle};
