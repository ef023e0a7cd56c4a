//! Print the notetags parsed from one database entry

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use shop_core::{DatabaseOracle, EntryId, EntryKey, EntryKind, parse_note};

use crate::utils;

/// Print the canonical notetags parsed from one entry
#[derive(Parser)]
pub struct Notes {
    /// Entry id
    #[arg(value_name = "ID")]
    id: u32,

    /// Table the entry lives in
    #[arg(short, long, value_parser = utils::parse_kind, default_value = "skill")]
    kind: EntryKind,

    /// Also print the raw note field
    #[arg(long)]
    raw: bool,
}

impl Notes {
    pub fn execute(self, project: &Path) -> Result<()> {
        let content = utils::load(project)?;
        let key = EntryKey::new(self.kind, EntryId(self.id));
        let entry = content
            .database
            .entry(self.kind, key.id)
            .with_context(|| format!("{} not found", key))?;
        let notes = content
            .registry
            .get(key)
            .with_context(|| format!("{} was not processed", key))?;

        println!("{} {} {}", style("▶").cyan().bold(), style(key).bold(), entry.name);

        if self.raw {
            println!("{}", style("Note:").dim());
            for line in entry.note.lines() {
                println!("  {}", style(line).dim());
            }
        }

        let recognized = parse_note(&entry.note);
        println!("{} {}", style("Recognized tags:").dim(), recognized.len());
        for directive in &recognized {
            println!("  {}", directive);
        }

        println!("{}", style("Effective cost:").dim());
        for line in notes.cost.to_notetags().lines() {
            println!("  {}", style(line).green());
        }

        if notes.retain_on_death {
            println!("  {}", style("<retain on death>").green());
        }
        if !notes.shop_skills.is_empty() {
            let ids: Vec<String> = notes.shop_skills.iter().map(|id| id.0.to_string()).collect();
            println!("  {}", style(format!("<shop skills: {}>", ids.join(", "))).green());
        }

        Ok(())
    }
}
