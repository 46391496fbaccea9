//! User domain handlers - profile and email entry.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::domain::conversation::ConversationState;
use crate::domain::event::Event;
use crate::domain::foundation::DomainError;
use crate::domain::outcome::Outcome;
use crate::ports::{ConversationStateStore, UserDirectory};

use super::super::pipeline::EventHandler;

/// Accepts the email address while the conversation is in `awaiting_email`.
pub struct EmailEntryHandler {
    state_store: Arc<dyn ConversationStateStore>,
}

impl EmailEntryHandler {
    pub fn new(state_store: Arc<dyn ConversationStateStore>) -> Self {
        Self { state_store }
    }
}

fn is_plausible_email(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.contains(char::is_whitespace)
        && trimmed.split('@').count() == 2
        && trimmed.split('@').nth(1).is_some_and(|d| d.contains('.'))
}

#[async_trait]
impl EventHandler for EmailEntryHandler {
    async fn handle(
        &self,
        event: &Event,
        state: &ConversationState,
    ) -> Result<Outcome, DomainError> {
        let Event::Message(message) = event else {
            return Err(DomainError::internal("email entry routed a non-message"));
        };

        let Some(text) = message.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(Outcome::from_error(&DomainError::validation(
                "email",
                "Please send your email address as text.",
            )));
        };

        if !is_plausible_email(text) {
            return Ok(Outcome::from_error(&DomainError::validation(
                "email",
                "That does not look like an email address, please try again.",
            )));
        }

        // The flow is complete; the address travels in the side-effect data
        // for the external directory to persist.
        let mut updated = state.clone();
        updated.reset();

        self.state_store
            .set(event.originator_id(), &updated)
            .await
            .map_err(|e| DomainError::internal(format!("state save failed: {}", e)))?;

        Ok(Outcome::success()
            .with_user_message("Email saved, thank you!")
            .with_ack("Saved")
            .with_data(json!({ "email": text })))
    }
}

/// Shows the user's balances. Wired behind `RequireRegisteredUser`.
pub struct ProfileHandler {
    directory: Arc<dyn UserDirectory>,
}

impl ProfileHandler {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl EventHandler for ProfileHandler {
    async fn handle(
        &self,
        event: &Event,
        _state: &ConversationState,
    ) -> Result<Outcome, DomainError> {
        let record = self
            .directory
            .lookup(event.originator_id())
            .await
            .map_err(|e| DomainError::internal(format!("user lookup failed: {}", e)))?
            .ok_or_else(|| DomainError::internal("profile shown for unregistered user"))?;

        Ok(Outcome::success()
            .with_user_message(format!(
                "Photos left: {}. Avatars left: {}.",
                record.photos_left, record.avatars_left
            ))
            .with_data(json!({
                "photos_left": record.photos_left,
                "avatars_left": record.avatars_left,
            })))
    }
}
