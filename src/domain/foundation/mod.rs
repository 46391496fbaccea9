//! Foundation module - Shared domain primitives.
//!
//! Contains the identifier value objects and the error taxonomy that form
//! the vocabulary of the routing engine.

mod errors;
mod ids;

pub use errors::{DomainError, ErrorCode, ResourceKind};
pub use ids::{CorrelationId, OriginatorId};
