//! Run a plugin command and print the shop it opens

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use console::style;
use shop_core::{CostResolver, PluginCommand, SkillShop};

use crate::utils::{self, StateArgs};

/// Run a plugin command, e.g. `OpenSkillShop 3`
#[derive(Parser)]
pub struct Plugin {
    /// Command name followed by its arguments
    #[arg(value_name = "COMMAND", required = true, num_args = 1..)]
    words: Vec<String>,

    #[command(flatten)]
    state: StateArgs,
}

impl Plugin {
    pub fn execute(self, project: &Path) -> Result<()> {
        let content = utils::load(project)?;

        let (command, args) = self
            .words
            .split_first()
            .map(|(command, args)| (command.as_str(), args))
            .unwrap_or_default();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let command = PluginCommand::from_parts(command, &args)?;

        let shop = SkillShop::from_command(command, &content.registry, &content.database)?;
        let store = self.state.store();
        let resolver = CostResolver::new(&content.registry, &content.database, &store);

        println!(
            "{} Skill shop from item {}",
            style("▶").cyan().bold(),
            style(shop.source).bold()
        );

        if shop.skills.is_empty() {
            println!("  {}", style("No skills for sale").yellow());
        }
        for id in &shop.missing {
            tracing::warn!("Shop lists skill {} which does not exist", id);
        }

        for listing in shop.listings(&resolver) {
            let price = if listing.check.can_buy() {
                style(listing.check.gold.required).green()
            } else {
                style(listing.check.gold.required).red()
            };
            println!(
                "\n{} {}  {} gold",
                style(listing.skill.id).dim(),
                style(&listing.skill.name).bold(),
                price
            );
            println!("  {}", style(&shop.requirements_text).dim());
            utils::print_check(&listing.check);
        }

        Ok(())
    }
}
