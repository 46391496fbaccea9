//! Handler execution pipeline.
//!
//! `RegisteredHandler::process` wraps every handler invocation with the
//! uniform cross-cutting sequence: best-effort processing signal, the
//! ordered policy checks, the business logic itself, and exactly one
//! acknowledgment attempt whatever the outcome. It is the containment
//! boundary for unexpected handler and policy errors; nothing below the
//! registry lets an error escape it.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::domain::conversation::ConversationState;
use crate::domain::event::Event;
use crate::domain::foundation::DomainError;
use crate::domain::outcome::Outcome;
use crate::ports::{Acknowledgment, Transport};

use super::policy::{Policy, PolicyDecision};

/// One unit of business logic bound to a domain.
///
/// Implementations read and mutate conversation state through the store,
/// call external collaborators, and return their outcome. They never
/// contain their own unexpected errors; `Err` propagates to the pipeline.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(
        &self,
        event: &Event,
        state: &ConversationState,
    ) -> Result<Outcome, DomainError>;
}

/// A handler bound to its routing key, with its policy chain.
///
/// Handler instances hold no per-event data; one instance serves all users
/// concurrently. Policies run in the order they were attached.
pub struct RegisteredHandler {
    name: &'static str,
    policies: Vec<Arc<dyn Policy>>,
    handler: Arc<dyn EventHandler>,
}

impl RegisteredHandler {
    pub fn new(name: &'static str, handler: Arc<dyn EventHandler>) -> Self {
        Self {
            name,
            policies: Vec::new(),
            handler,
        }
    }

    /// Appends a policy; attach outermost checks first.
    pub fn with_policy(mut self, policy: Arc<dyn Policy>) -> Self {
        self.policies.push(policy);
        self
    }

    /// Runs the full pipeline for one event.
    ///
    /// Never returns an error and triggers exactly one acknowledgment
    /// attempt; transport failures are logged and swallowed.
    pub async fn process(
        &self,
        event: &Event,
        state: &ConversationState,
        transport: &dyn Transport,
    ) -> Outcome {
        let originator = event.originator_id();

        if let Err(err) = transport.signal_processing(originator).await {
            warn!(
                handler = self.name,
                %originator,
                error = %err,
                "processing signal failed"
            );
        }

        let outcome = self.run(event, state).await;

        let ack = Acknowledgment::from_outcome(&outcome);
        if let Err(err) = transport.acknowledge(originator, &ack).await {
            warn!(
                handler = self.name,
                %originator,
                error = %err,
                "acknowledgment failed"
            );
        }

        outcome
    }

    async fn run(&self, event: &Event, state: &ConversationState) -> Outcome {
        let originator = event.originator_id();

        for policy in &self.policies {
            match policy.check(event, state).await {
                Ok(PolicyDecision::Continue) => {}
                Ok(PolicyDecision::Reject(outcome)) => {
                    debug!(
                        handler = self.name,
                        policy = policy.name(),
                        %originator,
                        code = ?outcome.error_code(),
                        "policy rejected event"
                    );
                    return outcome;
                }
                Err(err) => {
                    error!(
                        handler = self.name,
                        policy = policy.name(),
                        %originator,
                        error = %err,
                        "policy check failed"
                    );
                    return Outcome::from_error(&err);
                }
            }
        }

        match self.handler.handle(event, state).await {
            Ok(outcome) => outcome,
            Err(err) if err.code.is_soft() => {
                debug!(handler = self.name, %originator, error = %err, "handler returned soft failure");
                Outcome::from_error(&err)
            }
            Err(err) => {
                error!(
                    handler = self.name,
                    %originator,
                    code = %err.code,
                    error = %err,
                    "handler failed"
                );
                Outcome::from_error(&err)
            }
        }
    }
}
