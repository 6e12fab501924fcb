//! Performs the agent API call over a dedicated short-connect-timeout curl handle.
//!
//! One `Easy` handle per call: concurrent dispatches never share connection
//! state. Runs in the current thread; call from `spawn_blocking` if used from
//! async code.

use curl::easy::{Easy, List};
use std::time::Duration;

use crate::config::{AgentConfig, DEFAULT_CONNECT_TIMEOUT_MS};
use crate::error::DispatchError;
use crate::request::DispatchRequest;

/// `Ok(())` is success; the error variants are the failed outcomes.
pub type DispatchOutcome = Result<(), DispatchError>;

/// Response bytes kept for the debug log.
const MAX_RESPONSE_LOG_BYTES: usize = 4096;

#[derive(Debug, Clone, Copy)]
pub struct Executor {
    connect_timeout: Duration,
    request_timeout: Option<Duration>,
}

impl Executor {
    /// A zero `connect_timeout` would let curl fall back to its own long default,
    /// so it is replaced by the configured default.
    pub fn new(connect_timeout: Duration, request_timeout: Option<Duration>) -> Self {
        let connect_timeout = if connect_timeout.is_zero() {
            Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS)
        } else {
            connect_timeout
        };
        Self {
            connect_timeout,
            request_timeout,
        }
    }

    pub fn from_config(agent: &AgentConfig) -> Self {
        Self::new(agent.connect_timeout(), agent.request_timeout())
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// POST the request once. 2xx is success, a completed exchange with any other
    /// status is `Remote`, and transport failures are `Network`.
    pub fn execute(&self, request: DispatchRequest) -> DispatchOutcome {
        let mut response: Vec<u8> = Vec::new();

        let mut easy = Easy::new();
        easy.url(request.endpoint().as_str())?;
        easy.post(true)?;
        easy.post_fields_copy(request.body())?;
        easy.connect_timeout(self.connect_timeout)?;
        if let Some(timeout) = self.request_timeout {
            easy.timeout(timeout)?;
        }

        let mut list = List::new();
        for line in request.header_lines() {
            list.append(&line)?;
        }
        // No 100-continue round trip for a tiny JSON body.
        list.append("Expect:")?;
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                let room = MAX_RESPONSE_LOG_BYTES.saturating_sub(response.len());
                response.extend_from_slice(&data[..data.len().min(room)]);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        tracing::debug!(
            endpoint = %request.endpoint(),
            status = code,
            response = %String::from_utf8_lossy(&response),
            "agent responded"
        );
        if (200..300).contains(&code) {
            Ok(())
        } else {
            Err(DispatchError::Remote(code))
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::from_config(&AgentConfig::default())
    }
}
