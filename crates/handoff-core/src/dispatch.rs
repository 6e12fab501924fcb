//! One-shot hand-off of a media item to the download agent.
//!
//! Resolve the source URL, build the request, execute it, then either mark the
//! item as seen (success only, exactly once) or notify the user. Every failure
//! is logged with the target and its cause or status; nothing is retried.

use crate::config::AgentConfig;
use crate::error::{classify_curl_error, DispatchError};
use crate::executor::{DispatchOutcome, Executor};
use crate::media::MediaItem;
use crate::request;
use crate::resolve::{self, SubmissionPath};

/// Receives the "seen" mark for an item after a successful hand-off.
pub trait HistorySink {
    fn mark_seen(&self, item: &MediaItem);
}

impl<F: Fn(&MediaItem)> HistorySink for F {
    fn mark_seen(&self, item: &MediaItem) {
        self(item)
    }
}

/// Shows a failure to the user.
pub trait Notifier {
    fn notify_failure(&self, item: &MediaItem, message: &str);
}

impl<F: Fn(&MediaItem, &str)> Notifier for F {
    fn notify_failure(&self, item: &MediaItem, message: &str) {
        self(item, message)
    }
}

/// Submit `item` via `path` using the given configuration snapshot.
///
/// The snapshot should be read fresh for every call so configuration edits
/// apply to the next submission.
pub fn dispatch(
    agent: &AgentConfig,
    item: &MediaItem,
    path: SubmissionPath,
    history: &dyn HistorySink,
    notifier: &dyn Notifier,
) -> DispatchOutcome {
    let span = tracing::info_span!("dispatch", title = %item.title, path = %path);
    let _guard = span.enter();

    let outcome = submit(agent, item, path);
    match &outcome {
        Ok(()) => {
            tracing::info!("agent accepted package");
            history.mark_seen(item);
        }
        Err(err) => {
            log_failure(agent, err);
            notifier.notify_failure(item, &err.user_message());
        }
    }
    outcome
}

fn submit(agent: &AgentConfig, item: &MediaItem, path: SubmissionPath) -> DispatchOutcome {
    if !agent.is_enabled() {
        return Err(DispatchError::Config {
            reason: "download agent not configured",
            value: agent.base_url.clone(),
        });
    }
    let source = resolve::resolve_path(item, path)?;
    let req = request::build(agent, &item.title, &source)?;
    tracing::debug!(endpoint = %req.endpoint(), link = %source, "request built");
    Executor::from_config(agent).execute(req)
}

fn log_failure(agent: &AgentConfig, err: &DispatchError) {
    match err {
        DispatchError::Config { reason, value } => {
            tracing::error!(reason = *reason, value = %value, "submission rejected before sending");
        }
        DispatchError::Network(cause) => {
            tracing::error!(
                target_url = %agent.base_url,
                kind = classify_curl_error(cause).as_str(),
                cause = %cause,
                "agent unreachable"
            );
        }
        DispatchError::Remote(status) => {
            tracing::error!(target_url = %agent.base_url, status = *status, "agent returned error status");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::QualityTier;
    use std::cell::{Cell, RefCell};

    fn item() -> MediaItem {
        MediaItem::new("Show", "https://cdn.example.de/show.mp4")
    }

    #[test]
    fn unconfigured_agent_notifies_without_marking() {
        let marks = Cell::new(0);
        let messages = RefCell::new(Vec::new());
        let history = |_: &MediaItem| marks.set(marks.get() + 1);
        let notifier = |_: &MediaItem, msg: &str| messages.borrow_mut().push(msg.to_string());

        let outcome = dispatch(
            &AgentConfig::default(),
            &item(),
            SubmissionPath::Quality(QualityTier::Normal),
            &history,
            &notifier,
        );
        assert!(matches!(outcome, Err(DispatchError::Config { .. })));
        assert_eq!(marks.get(), 0);
        assert_eq!(messages.borrow().len(), 1);
    }

    #[test]
    fn invalid_base_url_is_reported_with_value() {
        let messages = RefCell::new(Vec::new());
        let history = |_: &MediaItem| panic!("must not mark on failure");
        let notifier = |_: &MediaItem, msg: &str| messages.borrow_mut().push(msg.to_string());

        let agent = AgentConfig::new("not a url", "u", "p");
        let outcome = dispatch(
            &agent,
            &item(),
            SubmissionPath::Quality(QualityTier::Normal),
            &history,
            &notifier,
        );
        assert!(matches!(outcome, Err(DispatchError::Config { .. })));
        assert!(messages.borrow()[0].contains("not a url"));
    }
}
