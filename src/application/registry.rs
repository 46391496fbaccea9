//! Domain registry - the engine's single entry point.
//!
//! Converts a raw inbound event into a dispatched outcome: load the
//! conversation state, classify the event into a domain, delegate to that
//! domain's router, and contain every failure so one broken conversation
//! can never take down the dispatch loop or touch another user's session.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::event::Event;
use crate::domain::foundation::{CorrelationId, ErrorCode};
use crate::domain::outcome::Outcome;
use crate::domain::routing::{BotDomain, ClassificationRules};
use crate::ports::{ConversationStateStore, Transport};

use super::router::Route;

const GENERIC_FAILURE: &str = "Something went wrong, please try again later";

/// Owns all domain routers and the classification tables.
///
/// Built once at startup via [`DomainRegistry::builder`]; the tables are
/// read-only afterwards, so dispatch takes no locks of its own.
pub struct DomainRegistry {
    rules: ClassificationRules,
    routers: HashMap<BotDomain, Arc<dyn Route>>,
    state_store: Arc<dyn ConversationStateStore>,
    transport: Arc<dyn Transport>,
}

impl DomainRegistry {
    pub fn builder(
        state_store: Arc<dyn ConversationStateStore>,
        transport: Arc<dyn Transport>,
    ) -> DomainRegistryBuilder {
        DomainRegistryBuilder {
            rules: ClassificationRules::standard().clone(),
            routers: HashMap::new(),
            state_store,
            transport,
        }
    }

    /// Dispatches one inbound event to completion.
    ///
    /// Never returns an error: malformed, unknown, and failing events all
    /// come back as failure outcomes with a code.
    pub async fn dispatch(&self, event: Event) -> Outcome {
        let correlation = CorrelationId::new();
        let originator = event.originator_id();

        let state = match self.state_store.get(originator).await {
            Ok(state) => state,
            Err(err) => {
                error!(%correlation, %originator, error = %err, "conversation state load failed");
                return Outcome::failure(ErrorCode::Internal, GENERIC_FAILURE);
            }
        };

        let domain = match &event {
            Event::Callback(c) => match self.rules.classify_callback(&c.raw_identifier) {
                Some(domain) => domain,
                None => {
                    error!(
                        %correlation,
                        %originator,
                        raw_identifier = %c.raw_identifier,
                        code = %ErrorCode::Unroutable,
                        "no domain claims callback"
                    );
                    return Outcome::failure(
                        ErrorCode::Unroutable,
                        "This button is no longer supported",
                    );
                }
            },
            Event::Message(m) => self.rules.classify_message(m, state.step_name()),
        };

        info!(
            %correlation,
            %originator,
            %domain,
            raw_identifier = event.raw_identifier().unwrap_or("-"),
            "dispatching event"
        );

        let Some(router) = self.routers.get(&domain) else {
            error!(
                %correlation,
                %originator,
                %domain,
                code = %ErrorCode::Unroutable,
                "no router registered for domain"
            );
            return Outcome::failure(ErrorCode::Unroutable, GENERIC_FAILURE);
        };

        let outcome = match router.route(&event, &state, self.transport.as_ref()).await {
            Ok(outcome) => outcome,
            // Second containment boundary: a faulty router implementation
            // must not crash the dispatch loop.
            Err(err) => {
                error!(%correlation, %originator, %domain, error = %err, "router failed");
                Outcome::failure(ErrorCode::Internal, GENERIC_FAILURE)
            }
        };

        if let Some(code) = outcome.error_code() {
            if code.is_soft() {
                info!(%correlation, %originator, %domain, %code, "dispatch ended with soft failure");
            } else {
                error!(%correlation, %originator, %domain, %code, "dispatch failed");
            }
        } else if !outcome.is_applicable() {
            warn!(%correlation, %originator, %domain, "message ignored by its domain");
        }

        outcome
    }

    /// Domains with a registered router.
    pub fn domains(&self) -> Vec<BotDomain> {
        self.routers.keys().copied().collect()
    }
}

/// One-shot builder; the registry is immutable after `build`.
pub struct DomainRegistryBuilder {
    rules: ClassificationRules,
    routers: HashMap<BotDomain, Arc<dyn Route>>,
    state_store: Arc<dyn ConversationStateStore>,
    transport: Arc<dyn Transport>,
}

impl DomainRegistryBuilder {
    /// Replaces the standard classification tables.
    pub fn with_rules(mut self, rules: ClassificationRules) -> Self {
        self.rules = rules;
        self
    }

    /// Adds a domain router, keyed by its own domain.
    pub fn add_router(mut self, router: Arc<dyn Route>) -> Self {
        self.routers.insert(router.domain(), router);
        self
    }

    pub fn build(self) -> DomainRegistry {
        DomainRegistry {
            rules: self.rules,
            routers: self.routers,
            state_store: self.state_store,
            transport: self.transport,
        }
    }
}
