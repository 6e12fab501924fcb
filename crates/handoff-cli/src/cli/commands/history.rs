//! `handoff history ...` – inspect and maintain the seen-history ledger.

use anyhow::Result;
use handoff_core::history::SeenHistory;

use crate::cli::HistoryCommand;

pub async fn run_history(action: HistoryCommand) -> Result<()> {
    let history = SeenHistory::open_default().await?;
    match action {
        HistoryCommand::List => {
            let entries = history.list().await?;
            if entries.is_empty() {
                println!("History is empty.");
            } else {
                println!("{:<6} {:<12} {:<40} {}", "ID", "SEEN_AT", "TITLE", "URL");
                for e in entries {
                    println!("{:<6} {:<12} {:<40} {}", e.id, e.seen_at, e.title, e.url);
                }
            }
        }
        HistoryCommand::Check { url } => {
            if history.is_seen(&url).await? {
                println!("seen: {url}");
            } else {
                println!("not seen: {url}");
            }
        }
        HistoryCommand::Optimize => {
            let (before, after) = history.optimize().await?;
            println!(
                "Removed {} duplicate entries ({} remain). Database compacted.",
                before.duplicates().saturating_sub(after.duplicates()),
                after.total
            );
        }
    }
    Ok(())
}
