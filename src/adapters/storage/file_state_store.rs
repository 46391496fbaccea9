//! File-backed conversation state store.
//!
//! One JSON document per originator under a configured directory. Suits a
//! single-process bot without a database; the per-originator serialization
//! the engine assumes makes file-level locking unnecessary.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::conversation::ConversationState;
use crate::domain::foundation::OriginatorId;
use crate::ports::{ConversationStateStore, StateStoreError};

/// Stores each originator's state as `<dir>/<originator_id>.json`.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    /// Creates a store rooted at `dir`, creating the directory if needed.
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self, StateStoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StateStoreError::Io(e.to_string()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, originator: OriginatorId) -> PathBuf {
        self.dir.join(format!("{}.json", originator))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ConversationStateStore for FileStateStore {
    async fn get(&self, originator: OriginatorId) -> Result<ConversationState, StateStoreError> {
        let path = self.path_for(originator);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            // No file means no conversation in progress.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ConversationState::idle());
            }
            Err(e) => return Err(StateStoreError::Io(e.to_string())),
        };
        serde_json::from_slice(&bytes).map_err(|e| StateStoreError::Deserialization(e.to_string()))
    }

    async fn set(
        &self,
        originator: OriginatorId,
        state: &ConversationState,
    ) -> Result<(), StateStoreError> {
        let json = serde_json::to_vec_pretty(state)
            .map_err(|e| StateStoreError::Serialization(e.to_string()))?;
        fs::write(self.path_for(originator), json)
            .await
            .map_err(|e| StateStoreError::Io(e.to_string()))
    }

    async fn clear(&self, originator: OriginatorId) -> Result<(), StateStoreError> {
        match fs::remove_file(self.path_for(originator)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StateStoreError::Io(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn originator() -> OriginatorId {
        OriginatorId::new(4242)
    }

    async fn store(tmp: &TempDir) -> FileStateStore {
        FileStateStore::new(tmp.path().join("states")).await.unwrap()
    }

    #[tokio::test]
    async fn creates_directory_on_construction() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp).await;
        assert!(store.dir().is_dir());
    }

    #[tokio::test]
    async fn absent_file_reads_as_idle() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp).await;

        let state = store.get(originator()).await.unwrap();
        assert!(state.is_idle());
    }

    #[tokio::test]
    async fn round_trips_state_with_typed_context() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp).await;

        let mut state = ConversationState::idle();
        state.begin_photo_upload(10);
        state.push_photo("file-abc");
        store.set(originator(), &state).await.unwrap();

        let loaded = store.get(originator()).await.unwrap();
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn clear_removes_the_file() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp).await;

        let mut state = ConversationState::idle();
        state.begin_email_entry();
        store.set(originator(), &state).await.unwrap();

        store.clear(originator()).await.unwrap();

        assert!(store.get(originator()).await.unwrap().is_idle());
        assert!(!store.path_for(originator()).exists());
    }

    #[tokio::test]
    async fn clearing_absent_state_is_a_noop() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp).await;
        store.clear(originator()).await.unwrap();
    }

    #[tokio::test]
    async fn corrupt_file_is_a_deserialization_error() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp).await;

        tokio::fs::write(store.path_for(originator()), b"{not json")
            .await
            .unwrap();

        let result = store.get(originator()).await;
        assert!(matches!(result, Err(StateStoreError::Deserialization(_))));
    }
}
