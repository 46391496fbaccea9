//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Which conversation state store backend to use
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

/// Storage configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// State store backend
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend's per-user JSON documents
    pub state_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == StorageBackend::File && self.state_dir.is_none() {
            return Err(ValidationError::MissingStateDir);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_backend_needs_no_directory() {
        assert!(StorageConfig::default().validate().is_ok());
    }

    #[test]
    fn file_backend_requires_state_dir() {
        let config = StorageConfig {
            backend: StorageBackend::File,
            state_dir: None,
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingStateDir)
        ));

        let config = StorageConfig {
            backend: StorageBackend::File,
            state_dir: Some(PathBuf::from("/tmp/states")),
        };
        assert!(config.validate().is_ok());
    }
}
