//! Privileged Set Port - the originators allowed into admin surfaces.

use crate::domain::foundation::OriginatorId;

/// Port exposing the privileged-id set.
///
/// Membership checks are synchronous: the set is static configuration or an
/// externally refreshed snapshot, never a per-check remote call.
pub trait PrivilegedSet: Send + Sync {
    /// True if the originator may use privileged handlers.
    fn contains(&self, originator: OriginatorId) -> bool;
}
