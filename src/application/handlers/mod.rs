//! Per-domain business handlers.
//!
//! One module per routing domain. Handlers hold their collaborators behind
//! `Arc<dyn ...>` ports and no per-event state.

pub mod admin;
pub mod auth;
pub mod broadcast;
pub mod generation;
pub mod payments;
pub mod user;

pub use admin::StatsHandler;
pub use auth::{CancelHandler, HelpHandler, StartHandler};
pub use broadcast::{BroadcastDraftHandler, BroadcastStartHandler};
pub use generation::{PhotoUploadHandler, StyleSelectHandler, PHOTOS_PER_UPLOAD};
pub use payments::TariffSelectHandler;
pub use user::{EmailEntryHandler, ProfileHandler};
