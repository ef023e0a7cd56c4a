//! Shared helpers for shop-cli commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use shop_content::{ContentFactory, ShopContent};
use shop_core::{CostLine, EntryKind, MemoryStore, PurchaseCheck};

/// Environment variable naming the default project directory.
pub const PROJECT_DIR_ENV: &str = "SHOP_PROJECT_DIR";

/// Resolve the project directory: explicit argument, then environment, then `.`.
pub fn project_dir(arg: Option<PathBuf>) -> PathBuf {
    arg.or_else(|| std::env::var_os(PROJECT_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn load(project: &Path) -> Result<ShopContent> {
    ContentFactory::new(project)
        .load()
        .with_context(|| format!("Failed to load project at {}", project.display()))
}

/// Party state flags shared by commands that evaluate costs.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct StateArgs {
    /// Party gold
    #[arg(long, default_value_t = 0)]
    pub gold: u32,

    /// Switch that is ON (repeatable)
    #[arg(long = "switch", value_name = "ID")]
    pub switches: Vec<u32>,

    /// Variable value as ID=VALUE (repeatable)
    #[arg(long = "var", value_name = "ID=VALUE", value_parser = parse_pair::<i64>)]
    pub variables: Vec<(u32, i64)>,

    /// Inventory held as [item|weapon|armor:]ID=COUNT (repeatable, kind defaults to item)
    #[arg(long = "item", value_name = "[KIND:]ID=COUNT", value_parser = parse_held)]
    pub items: Vec<(EntryKind, u32, u32)>,
}

impl StateArgs {
    pub fn store(&self) -> MemoryStore {
        let mut store = MemoryStore::new().with_gold(self.gold);
        for &id in &self.switches {
            store = store.with_switch(id, true);
        }
        for &(id, value) in &self.variables {
            store = store.with_variable(id, value);
        }
        for &(kind, id, count) in &self.items {
            store = store.with_item(kind, id, count);
        }
        store
    }
}

fn parse_pair<T: std::str::FromStr>(raw: &str) -> Result<(u32, T), String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{raw}'"))?;
    let id = id
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid id '{id}'"))?;
    let value = value
        .trim()
        .parse::<T>()
        .map_err(|_| format!("invalid value '{value}'"))?;
    Ok((id, value))
}

/// Parses `--item` values: `7=2`, `weapon:3=2`, `Armor:5=1`.
fn parse_held(raw: &str) -> Result<(EntryKind, u32, u32), String> {
    let (kind, pair) = match raw.split_once(':') {
        Some((kind, pair)) => (parse_kind(kind.trim())?, pair),
        None => (EntryKind::Item, raw),
    };
    if !kind.is_inventory() {
        return Err(format!("{kind} entries cannot be held in the inventory"));
    }
    let (id, count) = parse_pair::<u32>(pair)?;
    Ok((kind, id, count))
}

fn mark(ok: bool) -> console::StyledObject<&'static str> {
    if ok {
        style("✓").green()
    } else {
        style("✗").red()
    }
}

/// Print every line of a purchase check.
pub fn print_check(check: &PurchaseCheck<'_>) {
    println!(
        "  {} {} gold (have {})",
        mark(check.gold.satisfied()),
        style(check.gold.required).yellow(),
        check.gold.current
    );

    for line in &check.items {
        match line {
            CostLine::Resolved {
                kind,
                entry,
                quantity,
                held,
            } => println!(
                "  {} {} x{} ({} {}, have {})",
                mark(line.is_affordable()),
                style(&entry.name).bold(),
                quantity,
                kind,
                entry.id,
                held
            ),
            CostLine::Unresolved { kind, id, quantity } => println!(
                "  {} {} {} x{} {}",
                mark(false),
                kind,
                id,
                quantity,
                style("(not in database)").red()
            ),
        }
    }

    for status in &check.variable_costs {
        println!(
            "  {} variable {} costs {} (now {})",
            mark(status.satisfied()),
            status.variable,
            status.required,
            status.current
        );
    }
    for status in &check.variable_requirements {
        println!(
            "  {} variable {} at least {} (now {})",
            mark(status.satisfied()),
            status.variable,
            status.required,
            status.current
        );
    }
    for status in &check.switch_requirements {
        println!(
            "  {} switch {} is {} (now {})",
            mark(status.satisfied()),
            status.switch,
            on_off(status.required),
            on_off(status.current)
        );
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "ON" } else { "OFF" }
}

/// Parses a table name such as `skill` or `Weapon`.
pub fn parse_kind(raw: &str) -> Result<EntryKind, String> {
    raw.parse::<EntryKind>().map_err(|_| {
        let names: Vec<&str> = EntryKind::ALL.iter().map(|kind| kind.as_ref()).collect();
        format!("unknown table '{raw}', expected one of: {}", names.join(", "))
    })
}
