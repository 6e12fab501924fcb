//! Bridge from the synchronous dispatch path to the async ledger.

use tokio::runtime::Handle;

use super::db::SeenHistory;
use crate::dispatch::HistorySink;
use crate::media::MediaItem;

/// `HistorySink` backed by `SeenHistory`.
///
/// Dispatch is blocking, so it runs on a `spawn_blocking` thread; this sink
/// re-enters the runtime through `handle` to record the mark. Must not be
/// called from an async task (block_on would panic there).
#[derive(Clone)]
pub struct LedgerSink {
    history: SeenHistory,
    handle: Handle,
}

impl LedgerSink {
    pub fn new(history: SeenHistory, handle: Handle) -> Self {
        Self { history, handle }
    }
}

impl HistorySink for LedgerSink {
    fn mark_seen(&self, item: &MediaItem) {
        // The dispatch itself already succeeded; a ledger failure is only logged.
        if let Err(e) = self.handle.block_on(self.history.mark_seen(item)) {
            tracing::error!(title = %item.title, "failed to record history mark: {e:#}");
        }
    }
}
