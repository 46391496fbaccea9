//! Ports layer - interfaces to external collaborators.
//!
//! The engine consumes storage, directory, authorization, and transport
//! collaborators through these narrow traits; adapters provide the
//! implementations.

mod privileged_set;
mod state_store;
mod transport;
mod user_directory;

pub use privileged_set::PrivilegedSet;
pub use state_store::{ConversationStateStore, StateStoreError};
pub use transport::{Acknowledgment, Transport, TransportError};
pub use user_directory::{UserDirectory, UserDirectoryError, UserRecord};
