//! Inspection tool for skill shop notetags.
//!
//! Loads a host project, processes every note field, and prints what the shop
//! would show. Run with: `shop-cli --project <dir> <command>`

mod commands;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Costs, Notes, Plugin};

/// Skill shop notetag inspector
#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(about = "Inspect skill shop notetags in a game project", long_about = None)]
#[command(version)]
struct Cli {
    /// Project directory (defaults to $SHOP_PROJECT_DIR, then the current directory)
    #[arg(long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Show the resolved buy cost of one entry
    Costs(Costs),

    /// Print the canonical notetags parsed from one entry
    Notes(Notes),

    /// Run a plugin command, e.g. `OpenSkillShop 3`
    Plugin(Plugin),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for SHOP_PROJECT_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project = utils::project_dir(cli.project);

    match cli.command {
        Command::Costs(cmd) => cmd.execute(&project),
        Command::Notes(cmd) => cmd.execute(&project),
        Command::Plugin(cmd) => cmd.execute(&project),
    }
}
