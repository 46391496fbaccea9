//! Domain router - resolves an event within one domain to one handler.
//!
//! Routers are built once at startup and never mutated afterwards. Callback
//! routing matches registered prefixes longest-first, so a short generic
//! prefix can never shadow a more specific one; equal-length prefixes keep
//! registration order. Message routing is exact-match on command name or
//! current state name, then an optional media fallback for photo/video
//! messages, with an explicit non-error "not applicable" result when
//! nothing matches.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::conversation::ConversationState;
use crate::domain::event::{CallbackEvent, Event, MessageEvent};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::outcome::Outcome;
use crate::domain::routing::BotDomain;
use crate::ports::Transport;

use super::pipeline::RegisteredHandler;

/// The routing seam between the registry and a domain.
///
/// The registry treats router failures as containable: an `Err` escaping a
/// router implementation becomes an `INTERNAL` failure upstream.
#[async_trait]
pub trait Route: Send + Sync {
    fn domain(&self) -> BotDomain;

    async fn route(
        &self,
        event: &Event,
        state: &ConversationState,
        transport: &dyn Transport,
    ) -> Result<Outcome, DomainError>;
}

/// Immutable per-domain routing table.
pub struct DomainRouter {
    domain: BotDomain,
    /// (prefix, handler) pairs, sorted longest prefix first.
    callback_routes: Vec<(String, Arc<RegisteredHandler>)>,
    command_routes: HashMap<String, Arc<RegisteredHandler>>,
    message_routes: HashMap<String, Arc<RegisteredHandler>>,
    media_route: Option<Arc<RegisteredHandler>>,
}

impl DomainRouter {
    pub fn builder(domain: BotDomain) -> DomainRouterBuilder {
        DomainRouterBuilder {
            domain,
            callback_routes: Vec::new(),
            command_routes: HashMap::new(),
            message_routes: HashMap::new(),
            media_route: None,
        }
    }

    async fn route_callback(
        &self,
        callback: &CallbackEvent,
        event: &Event,
        state: &ConversationState,
        transport: &dyn Transport,
    ) -> Outcome {
        let matched = self
            .callback_routes
            .iter()
            .find(|(prefix, _)| callback.raw_identifier.starts_with(prefix.as_str()));

        match matched {
            Some((_, handler)) => handler.process(event, state, transport).await,
            None => Outcome::failure(
                ErrorCode::HandlerNotFound,
                "This button is no longer supported",
            ),
        }
    }

    async fn route_message(
        &self,
        message: &MessageEvent,
        event: &Event,
        state: &ConversationState,
        transport: &dyn Transport,
    ) -> Outcome {
        if let Some(command) = message.command.as_deref() {
            if let Some(handler) = self.command_routes.get(command) {
                return handler.process(event, state, transport).await;
            }
        }

        if let Some(step) = state.step_name() {
            if let Some(handler) = self.message_routes.get(step) {
                return handler.process(event, state, transport).await;
            }
        }

        if message.is_media() {
            if let Some(handler) = &self.media_route {
                return handler.process(event, state, transport).await;
            }
        }

        // Not an error: this domain simply has nothing to do with the
        // message in the user's current state.
        Outcome::ignored()
    }
}

#[async_trait]
impl Route for DomainRouter {
    fn domain(&self) -> BotDomain {
        self.domain
    }

    async fn route(
        &self,
        event: &Event,
        state: &ConversationState,
        transport: &dyn Transport,
    ) -> Result<Outcome, DomainError> {
        match event {
            Event::Callback(c) => Ok(self.route_callback(c, event, state, transport).await),
            Event::Message(m) => Ok(self.route_message(m, event, state, transport).await),
        }
    }
}

/// Build-time registration; no runtime mutation after `build`.
pub struct DomainRouterBuilder {
    domain: BotDomain,
    callback_routes: Vec<(String, Arc<RegisteredHandler>)>,
    command_routes: HashMap<String, Arc<RegisteredHandler>>,
    message_routes: HashMap<String, Arc<RegisteredHandler>>,
    media_route: Option<Arc<RegisteredHandler>>,
}

impl DomainRouterBuilder {
    /// Registers a handler for callback identifiers starting with `prefix`.
    pub fn register_callback(
        mut self,
        prefix: impl Into<String>,
        handler: Arc<RegisteredHandler>,
    ) -> Self {
        self.callback_routes.push((prefix.into(), handler));
        self
    }

    /// Registers a handler for an exact command name.
    pub fn register_command(
        mut self,
        command: impl Into<String>,
        handler: Arc<RegisteredHandler>,
    ) -> Self {
        self.command_routes.insert(command.into(), handler);
        self
    }

    /// Registers a handler for messages arriving in an exact state.
    pub fn register_message(
        mut self,
        state_name: impl Into<String>,
        handler: Arc<RegisteredHandler>,
    ) -> Self {
        self.message_routes.insert(state_name.into(), handler);
        self
    }

    /// Registers the fallback handler for photo/video messages that match
    /// no command or state route.
    pub fn register_media(mut self, handler: Arc<RegisteredHandler>) -> Self {
        self.media_route = Some(handler);
        self
    }

    pub fn build(mut self) -> DomainRouter {
        // Longest prefix wins; the sort is stable so equal-length prefixes
        // keep registration order.
        self.callback_routes
            .sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));
        DomainRouter {
            domain: self.domain,
            callback_routes: self.callback_routes,
            command_routes: self.command_routes,
            message_routes: self.message_routes,
            media_route: self.media_route,
        }
    }
}
