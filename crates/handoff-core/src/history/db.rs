//! SQLite-backed seen-history implementation.

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::media::MediaItem;

/// Percent-encode a path for use in a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

/// One ledger row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenEntry {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub seen_at: i64,
}

/// Row count versus distinct URLs; the difference is the number of duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateStats {
    pub total: u64,
    pub distinct: u64,
}

impl DuplicateStats {
    pub fn duplicates(&self) -> u64 {
        self.total.saturating_sub(self.distinct)
    }
}

/// Handle to the seen-history database, stored at
/// `~/.local/state/handoff/history.db` on Debian.
#[derive(Clone)]
pub struct SeenHistory {
    pub(crate) pool: Pool<Sqlite>,
}

impl SeenHistory {
    /// Open (or create) the default history database and run migrations.
    pub async fn open_default() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("handoff")?;
        let db_path = xdg_dirs.place_state_file("history.db")?;
        Self::open_at(&db_path).await
    }

    /// Open (or create) the database at a specific path. Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let uri = path_to_sqlite_uri(path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(&uri)
            .await?;
        let db = SeenHistory { pool };
        db.migrate().await?;
        Ok(db)
    }

    pub(crate) async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS seen_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                url TEXT NOT NULL,
                seen_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_seen_history_url ON seen_history (url);")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Record `item` (keyed by its normal-quality URL) as seen.
    pub async fn mark_seen(&self, item: &MediaItem) -> Result<i64> {
        let id = sqlx::query("INSERT INTO seen_history (title, url, seen_at) VALUES (?1, ?2, ?3)")
            .bind(item.title.as_str())
            .bind(item.url_normal.as_str())
            .bind(unix_timestamp())
            .execute(&self.pool)
            .await?
            .last_insert_rowid();
        Ok(id)
    }

    pub async fn is_seen(&self, url: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM seen_history WHERE url = ?1 LIMIT 1")
            .bind(url)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// All entries, most recent first.
    pub async fn list(&self) -> Result<Vec<SeenEntry>> {
        let rows = sqlx::query(
            "SELECT id, title, url, seen_at FROM seen_history ORDER BY seen_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|row| SeenEntry {
                id: row.get("id"),
                title: row.get("title"),
                url: row.get("url"),
                seen_at: row.get("seen_at"),
            })
            .collect())
    }

    pub async fn check_duplicates(&self) -> Result<DuplicateStats> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS total, COUNT(DISTINCT url) AS distinct_urls FROM seen_history",
        )
        .fetch_one(&self.pool)
        .await?;
        let total: i64 = row.get("total");
        let distinct: i64 = row.get("distinct_urls");
        Ok(DuplicateStats {
            total: total as u64,
            distinct: distinct as u64,
        })
    }

    /// Delete all but the oldest row per URL. Returns the number of rows removed.
    pub async fn remove_duplicates(&self) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM seen_history
            WHERE id NOT IN (SELECT MIN(id) FROM seen_history GROUP BY url)
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Rebuild the database file to reclaim space.
    pub async fn compact(&self) -> Result<()> {
        sqlx::query("VACUUM").execute(&self.pool).await?;
        Ok(())
    }

    /// Remove duplicates and compact. Returns the stats before and after cleanup.
    pub async fn optimize(&self) -> Result<(DuplicateStats, DuplicateStats)> {
        let before = self.check_duplicates().await?;
        tracing::trace!("{} duplicates found in history", before.duplicates());
        let removed = self.remove_duplicates().await?;
        let after = self.check_duplicates().await?;
        tracing::trace!(
            "{} duplicates found in history after cleanup",
            after.duplicates()
        );
        self.compact().await?;
        tracing::debug!(removed, "history optimized");
        Ok((before, after))
    }
}

/// Current time as Unix seconds.
pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
/// Open an in-memory database for tests (no disk I/O).
pub(crate) async fn open_memory() -> Result<SeenHistory> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let db = SeenHistory { pool };
    db.migrate().await?;
    Ok(db)
}
