//! Adapters layer - concrete implementations of the ports.

pub mod auth;
pub mod directory;
pub mod storage;
pub mod transport;

pub use auth::StaticPrivilegedSet;
pub use directory::InMemoryUserDirectory;
pub use storage::{FileStateStore, InMemoryStateStore};
pub use transport::RecordingTransport;
