//! `handoff send <items.json> <index> [--quality ...]` – submit one item to the agent.

use anyhow::{Context, Result};
use handoff_core::config;
use handoff_core::dispatch::dispatch;
use handoff_core::history::{LedgerSink, SeenHistory};
use handoff_core::media::MediaItem;
use handoff_core::resolve::SubmissionPath;
use std::path::Path;

use super::{ensure_offered, pick_item};

fn print_failure(item: &MediaItem, message: &str) {
    eprintln!("{}: {}", item.title, message);
}

pub async fn run_send(
    config_path: &Path,
    items: &Path,
    index: usize,
    path: SubmissionPath,
) -> Result<()> {
    let item = pick_item(items, index)?;
    ensure_offered(&item, path)?;
    // Fresh snapshot so config edits apply to this submission.
    let agent = config::agent_snapshot(config_path)?;
    let history = SeenHistory::open_default().await?;
    let sink = LedgerSink::new(history, tokio::runtime::Handle::current());

    let outcome = tokio::task::spawn_blocking({
        let item = item.clone();
        move || dispatch(&agent, &item, path, &sink, &print_failure)
    })
    .await
    .context("dispatch task join")?;

    match outcome {
        Ok(()) => {
            println!("Handed off \"{}\" ({path}) to the download agent.", item.title);
            Ok(())
        }
        // The user notice is already printed; details are in the log.
        Err(_) => anyhow::bail!("submission did not happen"),
    }
}
