//! Bot configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BotConfig {
    /// Originator ids allowed into admin and broadcast surfaces
    /// (comma-separated in the environment).
    #[serde(default)]
    pub privileged_ids: Vec<i64>,
}

impl BotConfig {
    /// Validate bot configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.privileged_ids.iter().any(|id| *id == 0) {
            return Err(ValidationError::InvalidPrivilegedId);
        }
        Ok(())
    }
}
