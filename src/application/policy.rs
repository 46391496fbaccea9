//! Policy decorators - reusable pre-conditions around handler execution.
//!
//! Policies are an explicit ordered list applied by the pipeline, not
//! closure stacking: each check either continues or produces a terminal
//! failure envelope. Order matters; authorization wraps outermost and
//! resource checks innermost, since a balance check presumes a known user.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::domain::conversation::ConversationState;
use crate::domain::event::Event;
use crate::domain::foundation::{DomainError, ErrorCode, ResourceKind};
use crate::domain::outcome::Outcome;
use crate::ports::{PrivilegedSet, UserDirectory};

/// What a policy decided about an event.
#[derive(Debug)]
pub enum PolicyDecision {
    /// Run the next policy (or the handler).
    Continue,
    /// Stop; the wrapped handler is never invoked.
    Reject(Outcome),
}

/// A pre-condition checked before a handler runs.
///
/// `Err` means the check itself failed unexpectedly (e.g. the directory is
/// down) and is contained by the pipeline; a negative decision is a
/// `Reject`, not an error.
#[async_trait]
pub trait Policy: Send + Sync {
    /// Short name for log lines.
    fn name(&self) -> &'static str;

    async fn check(
        &self,
        event: &Event,
        state: &ConversationState,
    ) -> Result<PolicyDecision, DomainError>;
}

/// Rejects events from originators outside the privileged-id set.
pub struct RequireAuthorization {
    privileged: Arc<dyn PrivilegedSet>,
}

impl RequireAuthorization {
    pub fn new(privileged: Arc<dyn PrivilegedSet>) -> Self {
        Self { privileged }
    }
}

#[async_trait]
impl Policy for RequireAuthorization {
    fn name(&self) -> &'static str {
        "require_authorization"
    }

    async fn check(
        &self,
        event: &Event,
        _state: &ConversationState,
    ) -> Result<PolicyDecision, DomainError> {
        if self.privileged.contains(event.originator_id()) {
            Ok(PolicyDecision::Continue)
        } else {
            Ok(PolicyDecision::Reject(Outcome::failure(
                ErrorCode::PermissionDenied,
                "This action is available to administrators only",
            )))
        }
    }
}

/// Rejects events from originators with no record in the user directory.
pub struct RequireRegisteredUser {
    directory: Arc<dyn UserDirectory>,
}

impl RequireRegisteredUser {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl Policy for RequireRegisteredUser {
    fn name(&self) -> &'static str {
        "require_registered_user"
    }

    async fn check(
        &self,
        event: &Event,
        _state: &ConversationState,
    ) -> Result<PolicyDecision, DomainError> {
        let record = self
            .directory
            .lookup(event.originator_id())
            .await
            .map_err(|e| DomainError::internal(format!("user lookup failed: {}", e)))?;

        match record {
            Some(_) => Ok(PolicyDecision::Continue),
            None => Ok(PolicyDecision::Reject(Outcome::failure(
                ErrorCode::Validation,
                "Please register first with /start",
            ))),
        }
    }
}

/// Rejects events when the user's balance cannot cover the handler's needs.
///
/// Photos are checked before avatars and the first shortfall is reported.
pub struct RequireResources {
    directory: Arc<dyn UserDirectory>,
    photos_needed: u32,
    avatars_needed: u32,
}

impl RequireResources {
    pub fn new(directory: Arc<dyn UserDirectory>, photos_needed: u32, avatars_needed: u32) -> Self {
        Self {
            directory,
            photos_needed,
            avatars_needed,
        }
    }

    fn reject(kind: ResourceKind, needed: u32, available: u32) -> PolicyDecision {
        let err = DomainError::resource_insufficient(kind, needed, available);
        PolicyDecision::Reject(Outcome::from_error(&err).with_data(json!({
            "resource": kind.to_string(),
            "needed": needed,
            "available": available,
        })))
    }
}

#[async_trait]
impl Policy for RequireResources {
    fn name(&self) -> &'static str {
        "require_resources"
    }

    async fn check(
        &self,
        event: &Event,
        _state: &ConversationState,
    ) -> Result<PolicyDecision, DomainError> {
        let record = self
            .directory
            .lookup(event.originator_id())
            .await
            .map_err(|e| DomainError::internal(format!("balance lookup failed: {}", e)))?;

        let Some(record) = record else {
            return Ok(PolicyDecision::Reject(Outcome::failure(
                ErrorCode::Validation,
                "Please register first with /start",
            )));
        };

        if record.photos_left < self.photos_needed {
            return Ok(Self::reject(
                ResourceKind::Photos,
                self.photos_needed,
                record.photos_left,
            ));
        }
        if record.avatars_left < self.avatars_needed {
            return Ok(Self::reject(
                ResourceKind::Avatars,
                self.avatars_needed,
                record.avatars_left,
            ));
        }
        Ok(PolicyDecision::Continue)
    }
}
