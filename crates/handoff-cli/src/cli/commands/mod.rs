//! CLI command handlers, one per file.

mod config;
mod history;
mod list;
mod offers;
mod send;

pub use config::run_config;
pub use history::run_history;
pub use list::run_list;
pub use offers::run_offers;
pub use send::run_send;

use anyhow::Result;
use handoff_core::media::{self, MediaItem};
use handoff_core::resolve::{self, SubmissionPath};
use std::path::Path;

/// Load the item list and pick one item by position.
pub(crate) fn pick_item(items: &Path, index: usize) -> Result<MediaItem> {
    let mut list = media::load_items(items)?;
    let len = list.len();
    anyhow::ensure!(
        index < len,
        "item index {index} out of range ({len} items in {})",
        items.display()
    );
    Ok(list.swap_remove(index))
}

/// Refuse paths the item does not offer (no HQ variant, LOW identical to normal),
/// since the resolver would silently fall back to the normal URL.
pub(crate) fn ensure_offered(item: &MediaItem, path: SubmissionPath) -> Result<()> {
    anyhow::ensure!(
        resolve::is_offered(item, path),
        "{path} is not offered for \"{}\"",
        item.title
    );
    Ok(())
}
