//! `handoff list <items.json> [--since <unix>]` – list items with their seen state.

use anyhow::Result;
use handoff_core::filter::{ItemFilter, ItemList};
use handoff_core::history::SeenHistory;
use handoff_core::media;
use std::path::Path;

pub async fn run_list(items: &Path, since: Option<i64>) -> Result<()> {
    let filter = match since {
        Some(cutoff) => ItemFilter::PublishedSince { cutoff },
        None => ItemFilter::NoOp,
    };
    let mut list = ItemList::new(vec![filter]);
    list.extend(media::load_items(items)?);

    if list.is_empty() {
        println!("No items.");
        return Ok(());
    }

    let history = SeenHistory::open_default().await?;
    println!("{:<6} {:<5} {:<4} {}", "INDEX", "SEEN", "HQ", "TITLE");
    for (i, item) in list.items().iter().enumerate() {
        let seen = history.is_seen(&item.url_normal).await?;
        println!(
            "{:<6} {:<5} {:<4} {}",
            i,
            if seen { "yes" } else { "no" },
            if item.high_quality { "yes" } else { "-" },
            item.title
        );
    }
    Ok(())
}
