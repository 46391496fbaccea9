//! User Directory Port - lookup of registered users and their balances.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::OriginatorId;

/// Errors that can occur during directory lookups
#[derive(Debug, thiserror::Error)]
pub enum UserDirectoryError {
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A registered user's record as the policies see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub originator_id: OriginatorId,
    pub email: Option<String>,
    /// Remaining photo-generation credits.
    pub photos_left: u32,
    /// Remaining avatar-training credits.
    pub avatars_left: u32,
}

impl UserRecord {
    /// A freshly registered user with empty balances.
    pub fn new(originator_id: OriginatorId) -> Self {
        Self {
            originator_id,
            email: None,
            photos_left: 0,
            avatars_left: 0,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_balances(mut self, photos_left: u32, avatars_left: u32) -> Self {
        self.photos_left = photos_left;
        self.avatars_left = avatars_left;
        self
    }
}

/// Port for looking up registered users.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns the record for an originator, or `None` if unregistered.
    async fn lookup(
        &self,
        originator: OriginatorId,
    ) -> Result<Option<UserRecord>, UserDirectoryError>;
}
