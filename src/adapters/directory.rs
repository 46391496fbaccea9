//! In-memory user directory adapter.
//!
//! Test and development double for the external user store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::OriginatorId;
use crate::ports::{UserDirectory, UserDirectoryError, UserRecord};

/// In-memory directory of registered users.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    records: Arc<RwLock<HashMap<OriginatorId, UserRecord>>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a record.
    pub async fn insert(&self, record: UserRecord) {
        self.records
            .write()
            .await
            .insert(record.originator_id, record);
    }

    pub async fn remove(&self, originator: OriginatorId) {
        self.records.write().await.remove(&originator);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn lookup(
        &self,
        originator: OriginatorId,
    ) -> Result<Option<UserRecord>, UserDirectoryError> {
        Ok(self.records.read().await.get(&originator).cloned())
    }
}
