//! Build the authenticated `add_package` request for the download agent.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::AgentConfig;
use crate::error::DispatchError;

/// API path appended to the configured agent base URL.
pub const ADD_PACKAGE_PATH: &str = "/api/add_package";

/// Agent-side destination id for "default package queue".
pub const DEFAULT_DESTINATION: u32 = 1;

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// JSON body of `POST /api/add_package`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddPackage {
    pub name: String,
    pub dest: u32,
    pub links: Vec<String>,
}

/// Fully formed POST request; consumed by `executor::Executor::execute`.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    endpoint: Url,
    authorization: String,
    body: Vec<u8>,
}

impl DispatchRequest {
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Value of the `Authorization` header.
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn content_type(&self) -> &'static str {
        CONTENT_TYPE_JSON
    }

    /// Header lines as sent on the wire.
    pub fn header_lines(&self) -> Vec<String> {
        vec![
            format!("Authorization: {}", self.authorization),
            format!("Content-Type: {}", CONTENT_TYPE_JSON),
        ]
    }
}

/// `{base_url without trailing slashes}/api/add_package`, which must be an absolute http(s) URL.
pub fn endpoint_url(base_url: &str) -> Result<Url, DispatchError> {
    let joined = format!("{}{}", base_url.trim_end_matches('/'), ADD_PACKAGE_PATH);
    let url = Url::parse(&joined).map_err(|_| DispatchError::config("invalid base URL", base_url))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(DispatchError::config("invalid base URL", base_url)),
    }
}

/// `Basic base64(user:pass)` with the credentials taken verbatim.
pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

/// Build the request for submitting `url` under `title`.
///
/// A malformed base URL is reported as `DispatchError::Config` carrying the
/// configured string.
pub fn build(agent: &AgentConfig, title: &str, url: &Url) -> Result<DispatchRequest, DispatchError> {
    let endpoint = endpoint_url(&agent.base_url)?;

    let payload = AddPackage {
        name: title.to_string(),
        dest: DEFAULT_DESTINATION,
        links: vec![url.to_string()],
    };
    let body = serde_json::to_vec(&payload)
        .map_err(|_| DispatchError::config("unencodable title", title))?;

    Ok(DispatchRequest {
        endpoint,
        authorization: basic_auth(&agent.username, &agent.password),
        body,
    })
}
