//! Portray - Domain routing and conversation state engine
//!
//! The dispatch core of a photo-generation chat bot: classifies inbound
//! callback and message events into domains, resolves them to handlers,
//! and runs each handler inside a uniform policy/acknowledgment pipeline.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
