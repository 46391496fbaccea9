//! Conversation State Store Port - per-user conversation state.
//!
//! The store is the only shared mutable resource in the engine. It is keyed
//! by originator id; serializing concurrent events for the same originator
//! is the transport layer's responsibility, not the store's.

use async_trait::async_trait;

use crate::domain::conversation::ConversationState;
use crate::domain::foundation::OriginatorId;

/// Errors that can occur during state store operations
#[derive(Debug, thiserror::Error)]
pub enum StateStoreError {
    #[error("Failed to serialize state: {0}")]
    Serialization(String),

    #[error("Failed to deserialize state: {0}")]
    Deserialization(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Port for reading and writing per-user conversation state.
#[async_trait]
pub trait ConversationStateStore: Send + Sync {
    /// Load the state for an originator.
    ///
    /// An originator with no stored state gets the idle state; absence is
    /// not an error.
    async fn get(&self, originator: OriginatorId) -> Result<ConversationState, StateStoreError>;

    /// Persist the state for an originator, creating it on first write.
    async fn set(
        &self,
        originator: OriginatorId,
        state: &ConversationState,
    ) -> Result<(), StateStoreError>;

    /// Drop all state for an originator. Clearing an absent state is a
    /// no-op.
    async fn clear(&self, originator: OriginatorId) -> Result<(), StateStoreError>;
}
