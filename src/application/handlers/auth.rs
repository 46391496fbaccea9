//! Auth domain handlers - entry, cancellation, help.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::conversation::ConversationState;
use crate::domain::event::Event;
use crate::domain::foundation::DomainError;
use crate::domain::outcome::Outcome;
use crate::ports::ConversationStateStore;

use super::super::pipeline::EventHandler;

/// `/start` - greets the user and drops any stale conversation.
pub struct StartHandler {
    state_store: Arc<dyn ConversationStateStore>,
}

impl StartHandler {
    pub fn new(state_store: Arc<dyn ConversationStateStore>) -> Self {
        Self { state_store }
    }
}

#[async_trait]
impl EventHandler for StartHandler {
    async fn handle(
        &self,
        event: &Event,
        _state: &ConversationState,
    ) -> Result<Outcome, DomainError> {
        self.state_store
            .clear(event.originator_id())
            .await
            .map_err(|e| DomainError::internal(format!("state clear failed: {}", e)))?;

        Ok(Outcome::success()
            .with_user_message("Welcome! Pick a style to generate your first photos.")
            .with_ack("Let's go"))
    }
}

/// `/cancel` - abandons the current flow.
pub struct CancelHandler {
    state_store: Arc<dyn ConversationStateStore>,
}

impl CancelHandler {
    pub fn new(state_store: Arc<dyn ConversationStateStore>) -> Self {
        Self { state_store }
    }
}

#[async_trait]
impl EventHandler for CancelHandler {
    async fn handle(
        &self,
        event: &Event,
        state: &ConversationState,
    ) -> Result<Outcome, DomainError> {
        if state.is_idle() {
            return Ok(Outcome::success().with_user_message("Nothing to cancel."));
        }

        self.state_store
            .clear(event.originator_id())
            .await
            .map_err(|e| DomainError::internal(format!("state clear failed: {}", e)))?;

        Ok(Outcome::success()
            .with_user_message("Cancelled. You are back at the main menu.")
            .with_ack("Cancelled"))
    }
}

/// `/help` - lists what the bot can do. Reads nothing and clears nothing,
/// so asking for help mid-flow never loses progress.
pub struct HelpHandler;

#[async_trait]
impl EventHandler for HelpHandler {
    async fn handle(
        &self,
        _event: &Event,
        state: &ConversationState,
    ) -> Result<Outcome, DomainError> {
        let mut text = String::from(
            "Pick a style to generate photos, /profile for your balances, \
             /cancel to abandon the current step.",
        );
        if !state.is_idle() {
            text.push_str(" You have a step in progress; it is untouched.");
        }
        Ok(Outcome::success().with_user_message(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryStateStore;
    use crate::domain::event::MessageEvent;
    use crate::domain::foundation::OriginatorId;

    fn originator() -> OriginatorId {
        OriginatorId::new(1)
    }

    fn command(text: &str) -> Event {
        Event::Message(MessageEvent::from_text(originator(), text))
    }

    #[tokio::test]
    async fn start_clears_stale_conversation() {
        let store = Arc::new(InMemoryStateStore::new());
        let mut stale = ConversationState::idle();
        stale.begin_email_entry();
        store.set(originator(), &stale).await.unwrap();

        let handler = StartHandler::new(store.clone());
        let outcome = handler.handle(&command("/start"), &stale).await.unwrap();

        assert!(outcome.is_success());
        assert!(store.get(originator()).await.unwrap().is_idle());
    }

    #[tokio::test]
    async fn cancel_with_active_flow_clears_it() {
        let store = Arc::new(InMemoryStateStore::new());
        let mut active = ConversationState::idle();
        active.begin_photo_upload(10);
        store.set(originator(), &active).await.unwrap();

        let handler = CancelHandler::new(store.clone());
        let outcome = handler.handle(&command("/cancel"), &active).await.unwrap();

        assert!(outcome.is_success());
        assert_eq!(outcome.acknowledgment(), Some("Cancelled"));
        assert!(store.get(originator()).await.unwrap().is_idle());
    }

    #[tokio::test]
    async fn help_mentions_the_step_in_progress() {
        let mut active = ConversationState::idle();
        active.begin_email_entry();

        let outcome = HelpHandler
            .handle(&command("/help"), &active)
            .await
            .unwrap();

        assert!(outcome.is_success());
        assert!(outcome.user_message().unwrap().contains("in progress"));
    }

    #[tokio::test]
    async fn cancel_when_idle_says_so() {
        let store = Arc::new(InMemoryStateStore::new());
        let handler = CancelHandler::new(store);

        let outcome = handler
            .handle(&command("/cancel"), &ConversationState::idle())
            .await
            .unwrap();

        assert_eq!(outcome.user_message(), Some("Nothing to cancel."));
    }
}
