//! In-memory conversation state store.
//!
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::ConversationState;
use crate::domain::foundation::OriginatorId;
use crate::ports::{ConversationStateStore, StateStoreError};

/// In-memory store for per-user conversation state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStateStore {
    states: Arc<RwLock<HashMap<OriginatorId, ConversationState>>>,
}

impl InMemoryStateStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every stored state (useful for tests).
    pub async fn clear_all(&self) {
        self.states.write().await.clear();
    }

    /// Number of originators with stored state.
    pub async fn len(&self) -> usize {
        self.states.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.states.read().await.is_empty()
    }
}

#[async_trait]
impl ConversationStateStore for InMemoryStateStore {
    async fn get(&self, originator: OriginatorId) -> Result<ConversationState, StateStoreError> {
        let states = self.states.read().await;
        Ok(states.get(&originator).cloned().unwrap_or_default())
    }

    async fn set(
        &self,
        originator: OriginatorId,
        state: &ConversationState,
    ) -> Result<(), StateStoreError> {
        self.states.write().await.insert(originator, state.clone());
        Ok(())
    }

    async fn clear(&self, originator: OriginatorId) -> Result<(), StateStoreError> {
        self.states.write().await.remove(&originator);
        Ok(())
    }
}
