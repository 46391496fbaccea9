//! Transport Port - the chat surface the engine acknowledges through.
//!
//! The transport adapter delivers normalized events to the registry and
//! renders acknowledgments back to the platform. It also serializes events
//! per originator before dispatch; the engine assumes at most one in-flight
//! event per originator.

use async_trait::async_trait;

use crate::domain::foundation::OriginatorId;
use crate::domain::outcome::Outcome;

/// Errors that can occur while talking to the chat platform
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// What the pipeline asks the transport to show after handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgment {
    /// Text to surface, if any. `None` acknowledges silently.
    pub text: Option<String>,
    /// Whether to render as an alert rather than a quiet notice.
    pub alert: bool,
}

impl Acknowledgment {
    /// Derives the acknowledgment from a handler outcome: explicit ack text
    /// wins, then the user message; failures that should alert do.
    pub fn from_outcome(outcome: &Outcome) -> Self {
        let text = outcome
            .acknowledgment()
            .or_else(|| outcome.user_message())
            .map(str::to_string);
        Self {
            text,
            alert: !outcome.is_success() && outcome.should_alert_user(),
        }
    }
}

/// Port for the signals the pipeline sends back to the chat surface.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Best-effort "processing started" signal (e.g. a typing indicator).
    async fn signal_processing(&self, originator: OriginatorId) -> Result<(), TransportError>;

    /// Acknowledge a handled event. Called exactly once per event.
    async fn acknowledge(
        &self,
        originator: OriginatorId,
        ack: &Acknowledgment,
    ) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn ack_prefers_explicit_ack_text() {
        let outcome = Outcome::success()
            .with_user_message("Long explanation")
            .with_ack("Done!");
        let ack = Acknowledgment::from_outcome(&outcome);
        assert_eq!(ack.text.as_deref(), Some("Done!"));
        assert!(!ack.alert);
    }

    #[test]
    fn ack_falls_back_to_user_message() {
        let outcome = Outcome::success().with_user_message("Saved");
        let ack = Acknowledgment::from_outcome(&outcome);
        assert_eq!(ack.text.as_deref(), Some("Saved"));
    }

    #[test]
    fn hard_failure_acknowledges_with_alert() {
        let outcome = Outcome::failure(ErrorCode::Internal, "Something went wrong");
        let ack = Acknowledgment::from_outcome(&outcome);
        assert!(ack.alert);
    }

    #[test]
    fn soft_failure_acknowledges_quietly() {
        let outcome = Outcome::failure(ErrorCode::Validation, "Bad email");
        let ack = Acknowledgment::from_outcome(&outcome);
        assert!(!ack.alert);
        assert_eq!(ack.text.as_deref(), Some("Bad email"));
    }
}
