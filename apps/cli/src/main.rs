//! Datagent CLI - ask questions through the cached SQL agent model.
//!
//! This CLI provides a `datagent` command for exercising the question/query
//! response cache against a scripted model.

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use datagent_core::Config;

use commands::ask;

/// Datagent CLI
///
/// Runs questions through a model wrapped in the SQL response cache.
#[derive(Parser, Debug)]
#[command(
    name = "datagent",
    author,
    version,
    about = "Cached natural-language-to-SQL agent"
)]
struct Args {
    /// Log level filter (trace, debug, info, warn, error); defaults to warn,
    /// or to the config file's level when --config is given
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask questions in order
    ///
    /// Each question goes through the cache first; only misses reach the
    /// scripted model.
    Ask {
        /// TOML file with scripted question/reply pairs
        #[arg(short, long, value_name = "PATH")]
        script: PathBuf,

        /// Questions to ask
        #[arg(required = true)]
        questions: Vec<String>,
    },

    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(level) = args.log_level {
        config.logging.level = level;
    } else if args.config.is_none() {
        config.logging.level = "warn".to_string();
    }
    datagent_core::logging::init(&config.logging)
        .context("Failed to initialize logging")?;

    match args.command {
        Command::Ask { script, questions } => ask::execute(&config, &script, &questions).await?,
        Command::Config => commands::config::execute(&config)?,
    }

    Ok(())
}
