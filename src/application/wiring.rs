//! Standard registry wiring.
//!
//! Assembles the six-domain registry with the shipped handlers, the
//! standard classification tables, and the documented policy order:
//! authorization outermost, resource checks innermost.

use std::sync::Arc;

use crate::domain::routing::BotDomain;
use crate::ports::{ConversationStateStore, PrivilegedSet, Transport, UserDirectory};

use super::handlers::{
    BroadcastDraftHandler, BroadcastStartHandler, CancelHandler, EmailEntryHandler, HelpHandler,
    PhotoUploadHandler, ProfileHandler, StartHandler, StatsHandler, StyleSelectHandler,
    TariffSelectHandler,
};
use super::pipeline::{EventHandler, RegisteredHandler};
use super::policy::{Policy, RequireAuthorization, RequireRegisteredUser, RequireResources};
use super::registry::DomainRegistry;
use super::router::DomainRouter;

/// The external collaborators the engine is wired with.
#[derive(Clone)]
pub struct EngineDeps {
    pub state_store: Arc<dyn ConversationStateStore>,
    pub user_directory: Arc<dyn UserDirectory>,
    pub privileged: Arc<dyn PrivilegedSet>,
    pub transport: Arc<dyn Transport>,
}

fn plain(name: &'static str, handler: Arc<dyn EventHandler>) -> Arc<RegisteredHandler> {
    Arc::new(RegisteredHandler::new(name, handler))
}

fn guarded(
    name: &'static str,
    handler: Arc<dyn EventHandler>,
    policies: Vec<Arc<dyn Policy>>,
) -> Arc<RegisteredHandler> {
    let mut registered = RegisteredHandler::new(name, handler);
    for policy in policies {
        registered = registered.with_policy(policy);
    }
    Arc::new(registered)
}

/// Builds the production registry from its collaborators.
pub fn build_registry(deps: EngineDeps) -> DomainRegistry {
    let registered_user: Arc<dyn Policy> =
        Arc::new(RequireRegisteredUser::new(deps.user_directory.clone()));
    let admin_only: Arc<dyn Policy> =
        Arc::new(RequireAuthorization::new(deps.privileged.clone()));
    let one_photo_credit: Arc<dyn Policy> =
        Arc::new(RequireResources::new(deps.user_directory.clone(), 1, 0));

    let auth = DomainRouter::builder(BotDomain::Auth)
        .register_command(
            "start",
            plain("start", Arc::new(StartHandler::new(deps.state_store.clone()))),
        )
        .register_command(
            "cancel",
            plain("cancel", Arc::new(CancelHandler::new(deps.state_store.clone()))),
        )
        .register_command("help", plain("help", Arc::new(HelpHandler)))
        .build();

    let user = DomainRouter::builder(BotDomain::User)
        .register_message(
            "awaiting_email",
            plain(
                "email_entry",
                Arc::new(EmailEntryHandler::new(deps.state_store.clone())),
            ),
        )
        .register_callback(
            "profile_",
            guarded(
                "profile",
                Arc::new(ProfileHandler::new(deps.user_directory.clone())),
                vec![registered_user.clone()],
            ),
        )
        .register_command(
            "profile",
            guarded(
                "profile",
                Arc::new(ProfileHandler::new(deps.user_directory.clone())),
                vec![registered_user.clone()],
            ),
        )
        .build();

    let payments = DomainRouter::builder(BotDomain::Payments)
        .register_callback(
            "tariff_",
            guarded(
                "tariff_select",
                Arc::new(TariffSelectHandler::new(deps.state_store.clone())),
                vec![registered_user.clone()],
            ),
        )
        .build();

    // One pipeline serves both the explicit upload state and the media
    // fallback for out-of-the-blue photos.
    let photo_upload = guarded(
        "photo_upload",
        Arc::new(PhotoUploadHandler::new(deps.state_store.clone())),
        vec![registered_user.clone()],
    );
    let generation = DomainRouter::builder(BotDomain::Generation)
        .register_callback(
            "style_",
            guarded(
                "style_select",
                Arc::new(StyleSelectHandler::new(deps.state_store.clone())),
                vec![registered_user.clone(), one_photo_credit],
            ),
        )
        .register_message("awaiting_photos", photo_upload.clone())
        .register_media(photo_upload)
        .build();

    let admin = DomainRouter::builder(BotDomain::Admin)
        .register_callback(
            "admin_stats",
            guarded(
                "stats",
                Arc::new(StatsHandler::new(deps.user_directory.clone())),
                vec![admin_only.clone()],
            ),
        )
        .register_command(
            "stats",
            guarded(
                "stats",
                Arc::new(StatsHandler::new(deps.user_directory.clone())),
                vec![admin_only.clone()],
            ),
        )
        .build();

    let broadcast = DomainRouter::builder(BotDomain::Broadcast)
        .register_command(
            "broadcast",
            guarded(
                "broadcast_start",
                Arc::new(BroadcastStartHandler::new(deps.state_store.clone())),
                vec![admin_only.clone()],
            ),
        )
        .register_message(
            "broadcast_draft",
            guarded(
                "broadcast_draft",
                Arc::new(BroadcastDraftHandler::new(deps.state_store.clone())),
                vec![admin_only],
            ),
        )
        .build();

    DomainRegistry::builder(deps.state_store, deps.transport)
        .add_router(Arc::new(auth))
        .add_router(Arc::new(user))
        .add_router(Arc::new(payments))
        .add_router(Arc::new(generation))
        .add_router(Arc::new(admin))
        .add_router(Arc::new(broadcast))
        .build()
}
