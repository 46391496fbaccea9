//! Payments domain handlers - tariff selection.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::domain::conversation::ConversationState;
use crate::domain::event::Event;
use crate::domain::foundation::DomainError;
use crate::domain::outcome::Outcome;
use crate::ports::ConversationStateStore;

use super::super::pipeline::EventHandler;

/// Handles `tariff_<id>` callbacks and moves the conversation into the
/// payment flow. The payment provider itself is an external collaborator;
/// the transport layer picks the tariff id out of the side-effect data.
pub struct TariffSelectHandler {
    state_store: Arc<dyn ConversationStateStore>,
}

impl TariffSelectHandler {
    pub fn new(state_store: Arc<dyn ConversationStateStore>) -> Self {
        Self { state_store }
    }
}

#[async_trait]
impl EventHandler for TariffSelectHandler {
    async fn handle(
        &self,
        event: &Event,
        state: &ConversationState,
    ) -> Result<Outcome, DomainError> {
        let Some(raw) = event.raw_identifier() else {
            return Err(DomainError::internal("tariff select routed a non-callback"));
        };

        let tariff_id = raw.trim_start_matches("tariff_");
        if tariff_id.is_empty() {
            return Ok(Outcome::from_error(&DomainError::validation(
                "tariff",
                "Unknown tariff, please pick one from the menu.",
            )));
        }

        let mut updated = state.clone();
        updated.select_tariff(tariff_id);
        self.state_store
            .set(event.originator_id(), &updated)
            .await
            .map_err(|e| DomainError::internal(format!("state save failed: {}", e)))?;

        Ok(Outcome::success()
            .with_user_message(format!(
                "Tariff \"{}\" selected. Follow the payment link to continue.",
                tariff_id
            ))
            .with_ack("Tariff selected")
            .with_data(json!({ "tariff_id": tariff_id })))
    }
}
