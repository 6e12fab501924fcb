//! Media items and quality tiers.
//!
//! A `MediaItem` is read-only for the dispatch subsystem; it is owned by
//! whoever built the item list (usually parsed from a JSON list file).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// One downloadable work with its per-quality source URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub title: String,
    /// Normal-quality URL; always present.
    pub url_normal: String,
    /// High-quality URL. May be absent or equal to `url_normal`.
    #[serde(default)]
    pub url_high: Option<String>,
    /// Low-quality URL. May be absent or equal to `url_normal`.
    #[serde(default)]
    pub url_low: Option<String>,
    /// Broadcaster website for the item. May be blank.
    #[serde(default)]
    pub website_url: String,
    /// True when a high-quality variant is offered for this item.
    #[serde(default)]
    pub high_quality: bool,
    /// Publication time in unix seconds, if known.
    #[serde(default)]
    pub published_at: Option<i64>,
}

impl MediaItem {
    pub fn new(title: impl Into<String>, url_normal: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url_normal: url_normal.into(),
            url_high: None,
            url_low: None,
            website_url: String::new(),
            high_quality: false,
            published_at: None,
        }
    }

    pub fn with_high(mut self, url: impl Into<String>) -> Self {
        self.url_high = Some(url.into());
        self.high_quality = true;
        self
    }

    pub fn with_low(mut self, url: impl Into<String>) -> Self {
        self.url_low = Some(url.into());
        self
    }

    pub fn with_website(mut self, url: impl Into<String>) -> Self {
        self.website_url = url.into();
        self
    }

    pub fn with_published_at(mut self, ts: i64) -> Self {
        self.published_at = Some(ts);
        self
    }
}

/// Named resolution variant of the same item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Normal,
    High,
    Low,
}

impl QualityTier {
    pub fn as_str(self) -> &'static str {
        match self {
            QualityTier::Normal => "normal",
            QualityTier::High => "high",
            QualityTier::Low => "low",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityTier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(QualityTier::Normal),
            "high" | "hq" => Ok(QualityTier::High),
            "low" => Ok(QualityTier::Low),
            other => anyhow::bail!("unknown quality tier: {other}"),
        }
    }
}

/// Read a JSON array of items from `path`.
pub fn load_items(path: &Path) -> Result<Vec<MediaItem>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("read item list {}", path.display()))?;
    parse_items(&data).with_context(|| format!("parse item list {}", path.display()))
}

pub fn parse_items(json: &str) -> Result<Vec<MediaItem>> {
    Ok(serde_json::from_str(json)?)
}
