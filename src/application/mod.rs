//! Application layer - dispatch pipeline, policies, routers, registry.

pub mod handlers;
pub mod pipeline;
pub mod policy;
pub mod registry;
pub mod router;
pub mod wiring;

pub use pipeline::{EventHandler, RegisteredHandler};
pub use policy::{
    Policy, PolicyDecision, RequireAuthorization, RequireRegisteredUser, RequireResources,
};
pub use registry::{DomainRegistry, DomainRegistryBuilder};
pub use router::{DomainRouter, DomainRouterBuilder, Route};
pub use wiring::{build_registry, EngineDeps};
