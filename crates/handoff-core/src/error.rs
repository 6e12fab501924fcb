//! Dispatch error taxonomy and curl error classification.

use thiserror::Error;

/// Why a single submission did not happen. None of these are fatal to the process.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Malformed agent base URL or a blank/unparsable per-path URL.
    #[error("{reason}: {value:?}")]
    Config { reason: &'static str, value: String },
    /// Transport failure: DNS, refused connection, connect timeout.
    #[error("agent unreachable: {0}")]
    Network(#[from] curl::Error),
    /// Agent answered with a non-2xx status.
    #[error("agent returned HTTP {0}")]
    Remote(u32),
}

impl DispatchError {
    pub(crate) fn config(reason: &'static str, value: impl Into<String>) -> Self {
        DispatchError::Config {
            reason,
            value: value.into(),
        }
    }

    /// Message shown to the user. Network and remote failures share one generic text;
    /// the detail goes to the log only.
    pub fn user_message(&self) -> String {
        match self {
            DispatchError::Config { reason, value } => format!("{reason}: {value}"),
            DispatchError::Network(_) | DispatchError::Remote(_) => {
                AGENT_UNREACHABLE_MESSAGE.to_string()
            }
        }
    }
}

pub const AGENT_UNREACHABLE_MESSAGE: &str = "Cannot reach the download agent. \
Make sure it is running and that the URL, user name and password in the settings are correct.";

/// Coarse transport failure class, used for log context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkFailure {
    Timeout,
    Connection,
    Other,
}

impl NetworkFailure {
    pub fn as_str(self) -> &'static str {
        match self {
            NetworkFailure::Timeout => "timeout",
            NetworkFailure::Connection => "connection",
            NetworkFailure::Other => "other",
        }
    }
}

/// Classify a curl error for diagnostics.
pub fn classify_curl_error(e: &curl::Error) -> NetworkFailure {
    if e.is_operation_timedout() {
        return NetworkFailure::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return NetworkFailure::Connection;
    }
    NetworkFailure::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_and_network_share_user_message() {
        let remote = DispatchError::Remote(500);
        let network = DispatchError::Network(curl::Error::new(7));
        assert_eq!(remote.user_message(), network.user_message());
        assert_eq!(remote.user_message(), AGENT_UNREACHABLE_MESSAGE);
    }

    #[test]
    fn config_message_names_offending_value() {
        let e = DispatchError::config("invalid base URL", "not a url");
        assert!(e.user_message().contains("not a url"));
        assert!(e.to_string().contains("invalid base URL"));
    }

    #[test]
    fn classify_curl_codes() {
        // CURLE_OPERATION_TIMEDOUT = 28, CURLE_COULDNT_CONNECT = 7, CURLE_COULDNT_RESOLVE_HOST = 6
        assert_eq!(
            classify_curl_error(&curl::Error::new(28)),
            NetworkFailure::Timeout
        );
        assert_eq!(
            classify_curl_error(&curl::Error::new(7)),
            NetworkFailure::Connection
        );
        assert_eq!(
            classify_curl_error(&curl::Error::new(6)),
            NetworkFailure::Connection
        );
        // CURLE_UNSUPPORTED_PROTOCOL
        assert_eq!(
            classify_curl_error(&curl::Error::new(1)),
            NetworkFailure::Other
        );
    }

    #[test]
    fn remote_display_has_status() {
        assert_eq!(DispatchError::Remote(404).to_string(), "agent returned HTTP 404");
    }
}
