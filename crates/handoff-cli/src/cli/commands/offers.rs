//! `handoff offers <items.json> <index>` – show the submission paths for an item.

use anyhow::Result;
use handoff_core::config;
use handoff_core::resolve::{self, SubmissionPath};
use std::path::Path;

use super::pick_item;

pub fn run_offers(config_path: &Path, items: &Path, index: usize) -> Result<()> {
    let item = pick_item(items, index)?;
    let agent = config::agent_snapshot(config_path)?;

    println!("{}", item.title);
    if !agent.is_enabled() {
        println!("  (download agent not configured; all paths disabled)");
    }
    for offer in resolve::offers(&item, agent.is_enabled()) {
        let target = match offer.path {
            SubmissionPath::Quality(tier) => resolve::resolve(&item, tier).to_string(),
            SubmissionPath::Website => item.website_url.clone(),
        };
        println!(
            "  {:<8} {:<9} {}",
            offer.path.to_string(),
            if offer.enabled { "enabled" } else { "disabled" },
            if target.trim().is_empty() { "-" } else { target.as_str() }
        );
    }
    Ok(())
}
