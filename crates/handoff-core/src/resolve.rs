//! Quality resolution and the "which submission paths are offered" decision.
//!
//! Kept free of any presentation concerns: the CLI (or any other front end)
//! renders whatever `offers` returns.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::DispatchError;
use crate::media::{MediaItem, QualityTier};

/// One way to submit an item: a quality tier, or the item's website URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionPath {
    Quality(QualityTier),
    Website,
}

impl fmt::Display for SubmissionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionPath::Quality(tier) => write!(f, "{tier}"),
            SubmissionPath::Website => f.write_str("website"),
        }
    }
}

impl FromStr for SubmissionPath {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        if s.trim().eq_ignore_ascii_case("website") {
            return Ok(SubmissionPath::Website);
        }
        Ok(SubmissionPath::Quality(s.parse()?))
    }
}

/// A listed submission path and whether it can be used right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offer {
    pub path: SubmissionPath,
    pub enabled: bool,
}

/// Raw URL string for `tier`. High and low fall back to the normal URL when the
/// item has no variant (absent or blank). Availability of HIGH is not checked here.
pub fn resolve(item: &MediaItem, tier: QualityTier) -> &str {
    let variant = match tier {
        QualityTier::Normal => return &item.url_normal,
        QualityTier::High => item.url_high.as_deref(),
        QualityTier::Low => item.url_low.as_deref(),
    };
    variant
        .filter(|u| !u.trim().is_empty())
        .unwrap_or(&item.url_normal)
}

/// True when LOW resolves to something other than the normal URL.
pub fn has_distinct_low(item: &MediaItem) -> bool {
    resolve(item, QualityTier::Low) != item.url_normal
}

fn parse_http_url(raw: &str, reason: &'static str) -> Result<Url, DispatchError> {
    let url = Url::parse(raw.trim()).map_err(|_| DispatchError::config(reason, raw))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(DispatchError::config(reason, raw)),
    }
}

/// Parsed source URL for a quality tier.
pub fn resolve_url(item: &MediaItem, tier: QualityTier) -> Result<Url, DispatchError> {
    parse_http_url(resolve(item, tier), "invalid source URL")
}

/// Parsed website URL. Blank or malformed disables the path; never falls back.
pub fn resolve_website(item: &MediaItem) -> Result<Url, DispatchError> {
    if item.website_url.trim().is_empty() {
        return Err(DispatchError::config("blank website URL", &item.website_url));
    }
    parse_http_url(&item.website_url, "invalid website URL")
}

pub fn resolve_path(item: &MediaItem, path: SubmissionPath) -> Result<Url, DispatchError> {
    match path {
        SubmissionPath::Quality(tier) => resolve_url(item, tier),
        SubmissionPath::Website => resolve_website(item),
    }
}

/// Whether `path` is listed for `item` at all (independent of agent configuration).
pub fn is_offered(item: &MediaItem, path: SubmissionPath) -> bool {
    match path {
        SubmissionPath::Quality(QualityTier::High) => item.high_quality,
        SubmissionPath::Quality(QualityTier::Normal) => true,
        SubmissionPath::Quality(QualityTier::Low) => has_distinct_low(item),
        SubmissionPath::Website => true,
    }
}

/// Paths to present for `item`, in display order: high, normal, low, website.
///
/// With `agent_enabled == false` everything is listed but disabled. The website
/// path is additionally disabled when the item has no website URL.
pub fn offers(item: &MediaItem, agent_enabled: bool) -> Vec<Offer> {
    [
        SubmissionPath::Quality(QualityTier::High),
        SubmissionPath::Quality(QualityTier::Normal),
        SubmissionPath::Quality(QualityTier::Low),
        SubmissionPath::Website,
    ]
    .into_iter()
    .filter(|path| is_offered(item, *path))
    .map(|path| {
        let enabled = match path {
            SubmissionPath::Website => agent_enabled && !item.website_url.trim().is_empty(),
            SubmissionPath::Quality(_) => agent_enabled,
        };
        Offer { path, enabled }
    })
    .collect()
}
