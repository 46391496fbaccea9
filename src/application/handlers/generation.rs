//! Generation domain handlers - style selection and photo upload.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::domain::conversation::{ConversationState, FlowContext};
use crate::domain::event::{Attachment, Event};
use crate::domain::foundation::DomainError;
use crate::domain::outcome::Outcome;
use crate::ports::ConversationStateStore;

use super::super::pipeline::EventHandler;

/// Photos a user must upload before avatar training can start.
pub const PHOTOS_PER_UPLOAD: u32 = 10;

/// Handles `style_<id>` callbacks. Wired behind registration and a
/// one-photo-credit resource check.
pub struct StyleSelectHandler {
    state_store: Arc<dyn ConversationStateStore>,
}

impl StyleSelectHandler {
    pub fn new(state_store: Arc<dyn ConversationStateStore>) -> Self {
        Self { state_store }
    }
}

#[async_trait]
impl EventHandler for StyleSelectHandler {
    async fn handle(
        &self,
        event: &Event,
        state: &ConversationState,
    ) -> Result<Outcome, DomainError> {
        let Some(raw) = event.raw_identifier() else {
            return Err(DomainError::internal("style select routed a non-callback"));
        };

        let style_id = raw.trim_start_matches("style_");
        if style_id.is_empty() {
            return Ok(Outcome::from_error(&DomainError::validation(
                "style",
                "Unknown style, please pick one from the menu.",
            )));
        }

        let mut updated = state.clone();
        updated.select_style(style_id);
        self.state_store
            .set(event.originator_id(), &updated)
            .await
            .map_err(|e| DomainError::internal(format!("state save failed: {}", e)))?;

        Ok(Outcome::success()
            .with_user_message(format!("Style \"{}\" it is. Generating...", style_id))
            .with_ack("Style selected")
            .with_data(json!({ "style_id": style_id })))
    }
}

/// Accumulates uploaded photos for avatar training.
///
/// Reached either through the `awaiting_photos` state or through the media
/// heuristic when a registered user sends a photo out of the blue; in the
/// latter case the upload flow starts implicitly.
pub struct PhotoUploadHandler {
    state_store: Arc<dyn ConversationStateStore>,
}

impl PhotoUploadHandler {
    pub fn new(state_store: Arc<dyn ConversationStateStore>) -> Self {
        Self { state_store }
    }
}

#[async_trait]
impl EventHandler for PhotoUploadHandler {
    async fn handle(
        &self,
        event: &Event,
        state: &ConversationState,
    ) -> Result<Outcome, DomainError> {
        let Event::Message(message) = event else {
            return Err(DomainError::internal("photo upload routed a non-message"));
        };

        let file_ids: Vec<&str> = message
            .attachments
            .iter()
            .filter_map(|a| match a {
                Attachment::Photo { file_id } => Some(file_id.as_str()),
                _ => None,
            })
            .collect();

        if file_ids.is_empty() {
            return Ok(Outcome::from_error(&DomainError::validation(
                "photo",
                "Please send a photo (not a document or video).",
            )));
        }

        let mut updated = state.clone();
        if !matches!(updated.context(), FlowContext::AvatarUpload { .. }) {
            updated.begin_photo_upload(PHOTOS_PER_UPLOAD);
        }

        let mut uploaded = 0;
        for file_id in &file_ids {
            if let Some(count) = updated.push_photo(*file_id) {
                uploaded = count;
            }
        }

        let expected = match updated.context() {
            FlowContext::AvatarUpload { photos_expected, .. } => *photos_expected,
            _ => PHOTOS_PER_UPLOAD,
        };

        let outcome = if (uploaded as u32) >= expected {
            // Enough photos: the flow ends and training is handed off to
            // the external generation collaborator via side-effect data.
            updated.reset();
            Outcome::success()
                .with_user_message("All photos received! Avatar training has started.")
                .with_ack("Upload complete")
                .with_data(json!({ "photos_uploaded": uploaded, "complete": true }))
        } else {
            Outcome::success()
                .with_ack(format!("Photo {} of {}", uploaded, expected))
                .with_data(json!({ "photos_uploaded": uploaded, "complete": false }))
        };

        self.state_store
            .set(event.originator_id(), &updated)
            .await
            .map_err(|e| DomainError::internal(format!("state save failed: {}", e)))?;

        Ok(outcome)
    }
}
