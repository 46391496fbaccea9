//! Error taxonomy for the routing engine.
//!
//! Failures are classified by code, not by type: every failure envelope and
//! every propagated `DomainError` carries one of the canonical codes below.
//! Soft codes are expected user-facing outcomes (bad input, empty balance);
//! hard codes indicate a routing-table gap or a genuine defect and are
//! logged at error severity.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/// Canonical failure codes, rendered in wire form by `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Bad or missing input, including an unregistered user.
    Validation,
    /// Originator is not in the privileged-id set.
    PermissionDenied,
    /// Balance check failed; details name the resource and shortfall.
    ResourceInsufficient,
    /// A domain accepted the event but no handler matched.
    HandlerNotFound,
    /// No domain classified the event.
    Unroutable,
    /// Unexpected failure in a handler or collaborator.
    Internal,
}

impl ErrorCode {
    /// Soft failures are expected outcomes and must not alarm the user
    /// or page anyone.
    pub fn is_soft(&self) -> bool {
        matches!(self, ErrorCode::Validation | ErrorCode::ResourceInsufficient)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::Validation => "VALIDATION_ERROR",
            ErrorCode::PermissionDenied => "PERMISSION_DENIED",
            ErrorCode::ResourceInsufficient => "RESOURCE_INSUFFICIENT",
            ErrorCode::HandlerNotFound => "HANDLER_NOT_FOUND",
            ErrorCode::Unroutable => "UNROUTABLE",
            ErrorCode::Internal => "INTERNAL",
        };
        write!(f, "{}", s)
    }
}

/// The balances a handler can require before running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Photos,
    Avatars,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceKind::Photos => "photos",
            ResourceKind::Avatars => "avatars",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message).with_detail("field", field)
    }

    /// Creates a permission-denied error for an originator.
    pub fn permission_denied(originator: impl fmt::Display) -> Self {
        Self::new(ErrorCode::PermissionDenied, "Originator is not privileged")
            .with_detail("originator_id", originator.to_string())
    }

    /// Creates a resource-insufficiency error recording the shortfall.
    pub fn resource_insufficient(kind: ResourceKind, needed: u32, available: u32) -> Self {
        Self::new(
            ErrorCode::ResourceInsufficient,
            format!("Not enough {}: need {}, have {}", kind, needed, available),
        )
        .with_detail("resource", kind.to_string())
        .with_detail("shortfall", (needed.saturating_sub(available)).to_string())
    }

    /// Creates an internal error wrapping an unexpected failure.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}
