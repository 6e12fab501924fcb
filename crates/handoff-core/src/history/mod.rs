//! Seen-history ledger (SQLite via sqlx).
//!
//! Records which items were handed off to the agent, plus maintenance
//! operations (duplicate cleanup, compaction).

mod db;
mod sink;

pub use db::*;
pub use sink::LedgerSink;
