//! Inbound event model.
//!
//! The transport layer normalizes every platform update into one `Event`
//! value at the boundary, so no downstream component ever probes a payload
//! for an identifying field. An event is created once per update and
//! consumed exactly once by the registry.

use serde::{Deserialize, Serialize};

use super::foundation::OriginatorId;

/// An inbound update, already normalized by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// The user pressed an inline button.
    Callback(CallbackEvent),
    /// The user sent text or media.
    Message(MessageEvent),
}

impl Event {
    /// Returns the originator id regardless of event shape.
    pub fn originator_id(&self) -> OriginatorId {
        match self {
            Event::Callback(c) => c.originator_id,
            Event::Message(m) => m.originator_id,
        }
    }

    /// Returns the raw callback identifier, if this is a callback.
    pub fn raw_identifier(&self) -> Option<&str> {
        match self {
            Event::Callback(c) => Some(&c.raw_identifier),
            Event::Message(_) => None,
        }
    }
}

/// An inline-button press carrying an opaque identifier string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackEvent {
    pub originator_id: OriginatorId,
    pub raw_identifier: String,
}

impl CallbackEvent {
    pub fn new(originator_id: OriginatorId, raw_identifier: impl Into<String>) -> Self {
        Self {
            originator_id,
            raw_identifier: raw_identifier.into(),
        }
    }
}

/// A text or media submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEvent {
    pub originator_id: OriginatorId,
    pub text: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Slash-command name without the leading `/`, when the text is a command.
    pub command: Option<String>,
}

impl MessageEvent {
    /// Builds a plain text message, extracting a leading `/command` if present.
    ///
    /// Commands may carry a bot mention suffix (`/start@some_bot`), which is
    /// stripped along with any trailing arguments.
    pub fn from_text(originator_id: OriginatorId, text: impl Into<String>) -> Self {
        let text = text.into();
        let command = parse_command(&text);
        Self {
            originator_id,
            text: Some(text),
            attachments: Vec::new(),
            command,
        }
    }

    /// Builds a media message with no caption.
    pub fn from_attachments(originator_id: OriginatorId, attachments: Vec<Attachment>) -> Self {
        Self {
            originator_id,
            text: None,
            attachments,
            command: None,
        }
    }

    /// Builds an empty message (no text, no media).
    pub fn empty(originator_id: OriginatorId) -> Self {
        Self {
            originator_id,
            text: None,
            attachments: Vec::new(),
            command: None,
        }
    }

    /// True if any attachment is a photo.
    pub fn has_photo(&self) -> bool {
        self.attachments
            .iter()
            .any(|a| matches!(a, Attachment::Photo { .. }))
    }

    /// True if any attachment is a video.
    pub fn has_video(&self) -> bool {
        self.attachments
            .iter()
            .any(|a| matches!(a, Attachment::Video { .. }))
    }

    /// True if the message carries a photo or video.
    pub fn is_media(&self) -> bool {
        self.has_photo() || self.has_video()
    }
}

/// Media attached to a message, referenced by the platform's file id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Attachment {
    Photo { file_id: String },
    Video { file_id: String },
    Document { file_id: String, file_name: Option<String> },
}

fn parse_command(text: &str) -> Option<String> {
    let rest = text.strip_prefix('/')?;
    let first = rest.split_whitespace().next()?;
    if first.is_empty() {
        return None;
    }
    // Drop a bot-mention suffix like "start@some_bot".
    let name = first.split('@').next().unwrap_or(first);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
