//! Domain layer - events, conversation state, classification, outcomes.

pub mod conversation;
pub mod event;
pub mod foundation;
pub mod outcome;
pub mod routing;
