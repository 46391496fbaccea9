//! Conversation state - where a user stands in a multi-step flow.
//!
//! Each originator has at most one active conversation. The state couples a
//! routing key (the step name message routers match on) with a typed flow
//! context, so data accumulated by one flow can never leak into another as
//! stale scratchpad keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The routing key for message dispatch while a flow is active.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateName(String);

impl StateName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StateName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Typed per-flow data. One variant per flow; switching flows replaces the
/// whole context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "flow", rename_all = "snake_case")]
pub enum FlowContext {
    /// No flow in progress.
    #[default]
    Idle,
    /// Collecting the user's email address.
    Registration { email: Option<String> },
    /// Collecting source photos for avatar training.
    AvatarUpload {
        photo_file_ids: Vec<String>,
        photos_expected: u32,
    },
    /// Generating photos in a selected style.
    Generation {
        style_id: Option<String>,
        tariff_id: Option<String>,
    },
    /// Awaiting payment for a selected tariff.
    Payment { tariff_id: String },
    /// An operator is composing a broadcast.
    Broadcast { draft: Option<String> },
}

/// A user's position in a conversation plus the flow's accumulated data.
///
/// Owned by the external state store; handlers read and write it through
/// the store and never cache it across events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    step: Option<StateName>,
    context: FlowContext,
    updated_at: DateTime<Utc>,
}

impl ConversationState {
    /// The state of a user with no conversation in progress.
    pub fn idle() -> Self {
        Self {
            step: None,
            context: FlowContext::Idle,
            updated_at: Utc::now(),
        }
    }

    /// Moves the conversation to a new step, replacing the flow context.
    pub fn transition(&mut self, step: StateName, context: FlowContext) {
        self.step = Some(step);
        self.context = context;
        self.updated_at = Utc::now();
    }

    /// Ends the conversation and drops all flow data.
    pub fn reset(&mut self) {
        self.step = None;
        self.context = FlowContext::Idle;
        self.updated_at = Utc::now();
    }

    pub fn step(&self) -> Option<&StateName> {
        self.step.as_ref()
    }

    /// The step name as a plain string, for classification and routing.
    pub fn step_name(&self) -> Option<&str> {
        self.step.as_ref().map(StateName::as_str)
    }

    pub fn context(&self) -> &FlowContext {
        &self.context
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_idle(&self) -> bool {
        self.step.is_none()
    }

    // ---- Typed flow helpers ----

    /// Starts the email-entry flow.
    pub fn begin_email_entry(&mut self) {
        self.transition(
            StateName::from("awaiting_email"),
            FlowContext::Registration { email: None },
        );
    }

    /// Starts the photo-upload flow expecting `photos_expected` photos.
    pub fn begin_photo_upload(&mut self, photos_expected: u32) {
        self.transition(
            StateName::from("awaiting_photos"),
            FlowContext::AvatarUpload {
                photo_file_ids: Vec::new(),
                photos_expected,
            },
        );
    }

    /// Records one uploaded photo; returns how many have accumulated, or
    /// `None` if no upload flow is active.
    pub fn push_photo(&mut self, file_id: impl Into<String>) -> Option<usize> {
        match &mut self.context {
            FlowContext::AvatarUpload { photo_file_ids, .. } => {
                photo_file_ids.push(file_id.into());
                self.updated_at = Utc::now();
                Some(photo_file_ids.len())
            }
            _ => None,
        }
    }

    /// Starts a generation flow with the chosen style.
    pub fn select_style(&mut self, style_id: impl Into<String>) {
        self.transition(
            StateName::from("generation_style_chosen"),
            FlowContext::Generation {
                style_id: Some(style_id.into()),
                tariff_id: None,
            },
        );
    }

    /// Moves the conversation into the payment flow for a tariff.
    pub fn select_tariff(&mut self, tariff_id: impl Into<String>) {
        self.transition(
            StateName::from("awaiting_payment"),
            FlowContext::Payment { tariff_id: tariff_id.into() },
        );
    }

    /// Starts a broadcast-composition flow.
    pub fn begin_broadcast(&mut self) {
        self.transition(
            StateName::from("broadcast_draft"),
            FlowContext::Broadcast { draft: None },
        );
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_state_has_no_step() {
        let state = ConversationState::idle();
        assert!(state.is_idle());
        assert_eq!(state.step_name(), None);
        assert_eq!(state.context(), &FlowContext::Idle);
    }

    #[test]
    fn transition_replaces_step_and_context() {
        let mut state = ConversationState::idle();
        state.begin_email_entry();

        assert_eq!(state.step_name(), Some("awaiting_email"));
        assert_eq!(state.context(), &FlowContext::Registration { email: None });
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = ConversationState::idle();
        state.begin_photo_upload(10);
        state.push_photo("f1");

        state.reset();

        assert!(state.is_idle());
        assert_eq!(state.context(), &FlowContext::Idle);
    }

    #[test]
    fn switching_flows_drops_previous_context() {
        let mut state = ConversationState::idle();
        state.begin_photo_upload(10);
        state.push_photo("f1");

        // A new flow must not inherit the accumulated photos.
        state.begin_email_entry();

        assert_eq!(state.context(), &FlowContext::Registration { email: None });
    }

    #[test]
    fn push_photo_accumulates_in_order() {
        let mut state = ConversationState::idle();
        state.begin_photo_upload(3);

        assert_eq!(state.push_photo("a"), Some(1));
        assert_eq!(state.push_photo("b"), Some(2));

        match state.context() {
            FlowContext::AvatarUpload { photo_file_ids, photos_expected } => {
                assert_eq!(photo_file_ids, &vec!["a".to_string(), "b".to_string()]);
                assert_eq!(*photos_expected, 3);
            }
            other => panic!("unexpected context: {:?}", other),
        }
    }

    #[test]
    fn push_photo_outside_upload_flow_is_refused() {
        let mut state = ConversationState::idle();
        assert_eq!(state.push_photo("f1"), None);

        state.begin_email_entry();
        assert_eq!(state.push_photo("f1"), None);
    }

    #[test]
    fn select_tariff_enters_payment_flow() {
        let mut state = ConversationState::idle();
        state.select_tariff("comfort");

        assert_eq!(state.step_name(), Some("awaiting_payment"));
        assert_eq!(
            state.context(),
            &FlowContext::Payment { tariff_id: "comfort".to_string() }
        );
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut state = ConversationState::idle();
        state.begin_photo_upload(10);
        state.push_photo("file-1");

        let json = serde_json::to_string(&state).unwrap();
        let restored: ConversationState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, state);
    }
}
