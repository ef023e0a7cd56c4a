//! Show the resolved buy cost of one database entry

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use console::style;
use shop_core::{CostResolver, DatabaseOracle, EntryId, EntryKey, EntryKind};

use crate::utils::{self, StateArgs};

/// Show the resolved buy cost of one entry
#[derive(Parser)]
pub struct Costs {
    /// Entry id
    #[arg(value_name = "ID")]
    id: u32,

    /// Table the entry lives in
    #[arg(short, long, value_parser = utils::parse_kind, default_value = "skill")]
    kind: EntryKind,

    #[command(flatten)]
    state: StateArgs,
}

impl Costs {
    pub fn execute(self, project: &Path) -> Result<()> {
        let content = utils::load(project)?;
        let key = EntryKey::new(self.kind, EntryId(self.id));
        let store = self.state.store();
        let resolver = CostResolver::new(&content.registry, &content.database, &store);

        let check = resolver.check(key)?;
        let name = content
            .database
            .entry(self.kind, key.id)
            .map(|entry| entry.name.as_str())
            .unwrap_or_default();

        println!(
            "{} {} {}",
            style("▶").cyan().bold(),
            style(key).bold(),
            name
        );
        println!("{}", style(&content.registry.config().requirements_text).dim());
        utils::print_check(&check);

        let verdict = if check.can_buy() {
            style("can buy").green().bold()
        } else if !check.requirements_met() {
            style("requirements not met").red().bold()
        } else {
            style("cannot afford").yellow().bold()
        };
        println!("\n  {}", verdict);

        Ok(())
    }
}
