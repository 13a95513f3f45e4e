mod config;
mod index;
mod output;
mod query;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use config::Config;
use index::IndexStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "findex")]
#[command(about = "Local file-path indexer and search tool")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Search terms (when no subcommand is given)
    #[arg(trailing_var_arg = true)]
    terms: Vec<String>,

    /// Path to the index database (defaults to the config directory)
    #[arg(long)]
    db: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the index from the configured root folders
    Update,
    /// Show the folders with the most files
    Top,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let db_path = match cli.db {
        Some(path) => path,
        None => config::get_database_path()?,
    };

    match cli.command {
        Some(Commands::Update) => {
            let config = Config::load()?;
            index::rebuild(&config, &db_path)?;
        }
        Some(Commands::Top) => {
            let store = IndexStore::open(&db_path)?;
            output::print_top_folders(&store.top_folders()?)?;
        }
        None => {
            if cli.terms.is_empty() {
                Cli::command().print_help()?;
            } else {
                let store = IndexStore::open(&db_path)?;
                let results = query::search(&store, &cli.terms)?;
                output::print_paths(&results)?;
            }
        }
    }

    Ok(())
}
