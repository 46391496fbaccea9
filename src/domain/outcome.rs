//! Result envelope returned by every handler.
//!
//! An `Outcome` is built only through its constructors, which keep two
//! invariants: a failure always carries an error code, and a success never
//! does. The transport adapter consumes the envelope to decide what to show
//! the user and whether to log at error severity.

use serde_json::Value;

use super::foundation::{DomainError, ErrorCode};

/// Immutable outcome of one handled event.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    success: bool,
    applicable: bool,
    user_message: Option<String>,
    error_code: Option<ErrorCode>,
    data: Option<Value>,
    acknowledgment: Option<String>,
    should_alert_user: bool,
}

impl Outcome {
    /// A plain success with nothing to show.
    pub fn success() -> Self {
        Self {
            success: true,
            applicable: true,
            user_message: None,
            error_code: None,
            data: None,
            acknowledgment: None,
            should_alert_user: false,
        }
    }

    /// A failure carrying a code and a short human-readable message.
    ///
    /// `should_alert_user` defaults from the code's severity: soft codes
    /// are shown quietly, hard codes alert.
    pub fn failure(code: ErrorCode, user_message: impl Into<String>) -> Self {
        Self {
            success: false,
            applicable: true,
            user_message: Some(user_message.into()),
            error_code: Some(code),
            data: None,
            acknowledgment: None,
            should_alert_user: !code.is_soft(),
        }
    }

    /// The non-error success meaning "this domain has nothing to do with
    /// the message". Distinct from a failure so silent-ignore semantics
    /// stay distinguishable from a routing defect.
    pub fn ignored() -> Self {
        Self {
            applicable: false,
            ..Self::success()
        }
    }

    /// Maps a propagated error into a failure envelope.
    ///
    /// Soft errors surface their own message; hard errors surface a generic
    /// one so internal detail never reaches the user.
    pub fn from_error(err: &DomainError) -> Self {
        if err.code.is_soft() {
            Self::failure(err.code, err.message.clone())
        } else {
            Self::failure(err.code, "Something went wrong, please try again later")
        }
    }

    /// Sets the user-facing message.
    pub fn with_user_message(mut self, message: impl Into<String>) -> Self {
        self.user_message = Some(message.into());
        self
    }

    /// Sets the short acknowledgment text (e.g. a toast above the chat).
    pub fn with_ack(mut self, ack: impl Into<String>) -> Self {
        self.acknowledgment = Some(ack.into());
        self
    }

    /// Attaches structured side-effect data for the transport adapter.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Overrides the default alert behavior.
    pub fn with_alert(mut self, alert: bool) -> Self {
        self.should_alert_user = alert;
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// False only for the "not applicable to this domain" envelope.
    pub fn is_applicable(&self) -> bool {
        self.applicable
    }

    pub fn user_message(&self) -> Option<&str> {
        self.user_message.as_deref()
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        self.error_code
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn acknowledgment(&self) -> Option<&str> {
        self.acknowledgment.as_deref()
    }

    pub fn should_alert_user(&self) -> bool {
        self.should_alert_user
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_carries_no_error_code() {
        let outcome = Outcome::success().with_user_message("Done");
        assert!(outcome.is_success());
        assert!(outcome.is_applicable());
        assert_eq!(outcome.error_code(), None);
        assert_eq!(outcome.user_message(), Some("Done"));
    }

    #[test]
    fn failure_always_carries_a_code() {
        let outcome = Outcome::failure(ErrorCode::HandlerNotFound, "No handler matched");
        assert!(!outcome.is_success());
        assert_eq!(outcome.error_code(), Some(ErrorCode::HandlerNotFound));
        assert_eq!(outcome.user_message(), Some("No handler matched"));
    }

    #[test]
    fn soft_failures_do_not_alert_by_default() {
        let soft = Outcome::failure(ErrorCode::Validation, "Bad email");
        assert!(!soft.should_alert_user());

        let hard = Outcome::failure(ErrorCode::Internal, "boom");
        assert!(hard.should_alert_user());
    }

    #[test]
    fn alert_default_can_be_overridden() {
        let outcome = Outcome::failure(ErrorCode::Validation, "Bad email").with_alert(true);
        assert!(outcome.should_alert_user());
    }

    #[test]
    fn ignored_is_a_non_error_non_applicable_success() {
        let outcome = Outcome::ignored();
        assert!(outcome.is_success());
        assert!(!outcome.is_applicable());
        assert_eq!(outcome.error_code(), None);
    }

    #[test]
    fn from_error_keeps_soft_messages() {
        let err = DomainError::new(ErrorCode::Validation, "Address has no @ sign");
        let outcome = Outcome::from_error(&err);
        assert_eq!(outcome.user_message(), Some("Address has no @ sign"));
        assert_eq!(outcome.error_code(), Some(ErrorCode::Validation));
    }

    #[test]
    fn from_error_hides_internal_detail() {
        let err = DomainError::internal("database connection refused");
        let outcome = Outcome::from_error(&err);
        assert_eq!(outcome.error_code(), Some(ErrorCode::Internal));
        assert!(!outcome.user_message().unwrap().contains("database"));
    }

    #[test]
    fn side_effect_data_is_preserved() {
        let outcome = Outcome::success().with_data(json!({ "photos_uploaded": 3 }));
        assert_eq!(outcome.data(), Some(&json!({ "photos_uploaded": 3 })));
    }
}
