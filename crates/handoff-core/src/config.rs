use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Connect timeout used for agent calls unless overridden in config.toml.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 500;

fn default_connect_timeout_ms() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_MS
}

/// Download agent connection settings (`[agent]` section in config.toml).
///
/// An empty `base_url` means the agent is not configured: submission paths are
/// still listed but disabled.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentConfig {
    /// Agent base URL, e.g. `http://localhost:8000`. Trailing slashes are ignored.
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Connect phase timeout in milliseconds. `0` is treated as the default,
    /// since curl would read it as "no bound of our own".
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Optional bound on the whole call. Unset means only the connect phase is bounded,
    /// so a connected but slow agent can block the caller.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: String::new(),
            password: String::new(),
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            request_timeout_secs: None,
        }
    }
}

impl AgentConfig {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    /// True when a base URL is configured (blank means feature disabled).
    pub fn is_enabled(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    pub fn connect_timeout(&self) -> Duration {
        match self.connect_timeout_ms {
            0 => Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            ms => Duration::from_millis(ms),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

// Password stays out of logs.
impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Global configuration loaded from `~/.config/handoff/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandoffConfig {
    #[serde(default)]
    pub agent: AgentConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("handoff")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HandoffConfig> {
    load_or_init_at(&config_path()?)
}

/// Like `load_or_init` but for an explicit path (tests, `--config`).
pub fn load_or_init_at(path: &Path) -> Result<HandoffConfig> {
    if !path.exists() {
        let default_cfg = HandoffConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: HandoffConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Fresh snapshot of the agent settings. Called once per dispatch so edits to
/// config.toml take effect on the next submission without a restart.
pub fn agent_snapshot(path: &Path) -> Result<AgentConfig> {
    Ok(load_or_init_at(path)?.agent)
}
