//! CLI for handing media items off to the download agent.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use handoff_core::config;
use handoff_core::resolve::SubmissionPath;
use std::path::PathBuf;

use commands::{run_config, run_history, run_list, run_offers, run_send};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "handoff")]
#[command(about = "Hand media downloads off to an external download agent", long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/handoff/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Submit one item from an item list file to the agent.
    Send {
        /// JSON file with an array of media items.
        items: PathBuf,
        /// Zero-based position of the item in the list.
        index: usize,
        /// Which URL to submit: normal, high, low or website.
        #[arg(long, default_value = "normal")]
        quality: SubmissionPath,
    },

    /// Show which submission paths are offered for an item.
    Offers {
        /// JSON file with an array of media items.
        items: PathBuf,
        /// Zero-based position of the item in the list.
        index: usize,
    },

    /// List items, optionally only those published since a unix timestamp.
    List {
        /// JSON file with an array of media items.
        items: PathBuf,
        #[arg(long, value_name = "UNIX_SECS")]
        since: Option<i64>,
    },

    /// Inspect or maintain the seen-history ledger.
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },

    /// Show config file location and agent settings (password hidden).
    Config,
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List all seen entries, most recent first.
    List,
    /// Report whether a URL has been seen.
    Check {
        url: String,
    },
    /// Remove duplicate entries and compact the database.
    Optimize,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let config_path = match cli.config {
            Some(path) => path,
            None => config::config_path()?,
        };
        // Agent settings are re-read per dispatch; this load only makes sure the file exists.
        let cfg = config::load_or_init_at(&config_path)?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Send {
                items,
                index,
                quality,
            } => run_send(&config_path, &items, index, quality).await?,
            CliCommand::Offers { items, index } => run_offers(&config_path, &items, index)?,
            CliCommand::List { items, since } => run_list(&items, since).await?,
            CliCommand::History { action } => run_history(action).await?,
            CliCommand::Config => run_config(&config_path)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
