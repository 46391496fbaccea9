//! Admin domain handlers. All of them sit behind `RequireAuthorization`.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::domain::conversation::ConversationState;
use crate::domain::event::Event;
use crate::domain::foundation::DomainError;
use crate::domain::outcome::Outcome;
use crate::ports::UserDirectory;

use super::super::pipeline::EventHandler;

/// `/stats` and `admin_stats` - a quick operator health view.
pub struct StatsHandler {
    directory: Arc<dyn UserDirectory>,
}

impl StatsHandler {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl EventHandler for StatsHandler {
    async fn handle(
        &self,
        event: &Event,
        _state: &ConversationState,
    ) -> Result<Outcome, DomainError> {
        // The directory only exposes point lookups; the caller's own record
        // doubles as a liveness probe for the backing store.
        let probe = self
            .directory
            .lookup(event.originator_id())
            .await
            .map_err(|e| DomainError::internal(format!("directory probe failed: {}", e)))?;

        Ok(Outcome::success()
            .with_user_message("Bot is up. Directory reachable.")
            .with_data(json!({ "directory_ok": true, "caller_registered": probe.is_some() })))
    }
}
