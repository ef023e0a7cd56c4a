//! Command implementations for shop-cli
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod costs;
mod notes;
mod plugin;

pub use costs::Costs;
pub use notes::Notes;
pub use plugin::Plugin;
