//! Broadcast domain handlers - operator announcements to all users.
//!
//! Delivery itself belongs to the transport layer; these handlers only run
//! the composition flow. Both sit behind `RequireAuthorization`.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::domain::conversation::{ConversationState, FlowContext};
use crate::domain::event::Event;
use crate::domain::foundation::DomainError;
use crate::domain::outcome::Outcome;
use crate::ports::ConversationStateStore;

use super::super::pipeline::EventHandler;

/// `/broadcast` - opens a draft.
pub struct BroadcastStartHandler {
    state_store: Arc<dyn ConversationStateStore>,
}

impl BroadcastStartHandler {
    pub fn new(state_store: Arc<dyn ConversationStateStore>) -> Self {
        Self { state_store }
    }
}

#[async_trait]
impl EventHandler for BroadcastStartHandler {
    async fn handle(
        &self,
        event: &Event,
        state: &ConversationState,
    ) -> Result<Outcome, DomainError> {
        let mut updated = state.clone();
        updated.begin_broadcast();
        self.state_store
            .set(event.originator_id(), &updated)
            .await
            .map_err(|e| DomainError::internal(format!("state save failed: {}", e)))?;

        Ok(Outcome::success()
            .with_user_message("Send the announcement text. /cancel to abort."))
    }
}

/// Captures the draft text while the conversation is in `broadcast_draft`.
pub struct BroadcastDraftHandler {
    state_store: Arc<dyn ConversationStateStore>,
}

impl BroadcastDraftHandler {
    pub fn new(state_store: Arc<dyn ConversationStateStore>) -> Self {
        Self { state_store }
    }
}

#[async_trait]
impl EventHandler for BroadcastDraftHandler {
    async fn handle(
        &self,
        event: &Event,
        state: &ConversationState,
    ) -> Result<Outcome, DomainError> {
        let Event::Message(message) = event else {
            return Err(DomainError::internal("broadcast draft routed a non-message"));
        };

        let Some(text) = message.text.as_deref().filter(|t| !t.trim().is_empty()) else {
            return Ok(Outcome::from_error(&DomainError::validation(
                "broadcast",
                "The announcement must be plain text.",
            )));
        };

        let mut updated = state.clone();
        updated.transition(
            "broadcast_ready".into(),
            FlowContext::Broadcast { draft: Some(text.to_string()) },
        );
        self.state_store
            .set(event.originator_id(), &updated)
            .await
            .map_err(|e| DomainError::internal(format!("state save failed: {}", e)))?;

        Ok(Outcome::success()
            .with_user_message("Draft saved. The transport will fan it out once confirmed.")
            .with_ack("Draft saved")
            .with_data(json!({ "draft_len": text.len() })))
    }
}
