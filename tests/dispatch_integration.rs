//! End-to-end dispatch tests over the standard wiring.
//!
//! Events enter through `DomainRegistry::dispatch` exactly as the transport
//! loop would deliver them; assertions run against the returned outcome,
//! the recording transport, and the state store.

use std::sync::Arc;

use portray::adapters::{
    InMemoryStateStore, InMemoryUserDirectory, RecordingTransport, StaticPrivilegedSet,
};
use portray::application::{build_registry, DomainRegistry, EngineDeps};
use portray::domain::conversation::ConversationState;
use portray::domain::event::{Attachment, CallbackEvent, Event, MessageEvent};
use portray::domain::foundation::{ErrorCode, OriginatorId};
use portray::ports::{ConversationStateStore, UserRecord};

struct Harness {
    registry: DomainRegistry,
    state_store: Arc<InMemoryStateStore>,
    directory: Arc<InMemoryUserDirectory>,
    transport: Arc<RecordingTransport>,
}

fn harness(privileged: &[i64]) -> Harness {
    let state_store = Arc::new(InMemoryStateStore::new());
    let directory = Arc::new(InMemoryUserDirectory::new());
    let transport = Arc::new(RecordingTransport::new());

    let registry = build_registry(EngineDeps {
        state_store: state_store.clone(),
        user_directory: directory.clone(),
        privileged: Arc::new(StaticPrivilegedSet::from_raw_ids(privileged)),
        transport: transport.clone(),
    });

    Harness {
        registry,
        state_store,
        directory,
        transport,
    }
}

fn user() -> OriginatorId {
    OriginatorId::new(500)
}

fn callback(id: OriginatorId, raw: &str) -> Event {
    Event::Callback(CallbackEvent::new(id, raw))
}

fn text(id: OriginatorId, t: &str) -> Event {
    Event::Message(MessageEvent::from_text(id, t))
}

async fn register(h: &Harness, id: OriginatorId, photos: u32, avatars: u32) {
    h.directory
        .insert(UserRecord::new(id).with_balances(photos, avatars))
        .await;
}

#[tokio::test]
async fn tariff_callback_resolves_through_payments_domain() {
    let h = harness(&[]);
    register(&h, user(), 0, 0).await;

    let outcome = h.registry.dispatch(callback(user(), "tariff_comfort")).await;

    assert!(outcome.is_success());
    assert_eq!(outcome.data().unwrap()["tariff_id"], "comfort");
    let state = h.state_store.get(user()).await.unwrap();
    assert_eq!(state.step_name(), Some("awaiting_payment"));
}

#[tokio::test]
async fn unknown_callback_is_unroutable_not_a_crash() {
    let h = harness(&[]);

    let outcome = h.registry.dispatch(callback(user(), "unknown_xyz")).await;

    assert!(!outcome.is_success());
    assert_eq!(outcome.error_code(), Some(ErrorCode::Unroutable));
}

#[tokio::test]
async fn empty_message_in_awaiting_email_routes_to_user_domain() {
    let h = harness(&[]);
    let mut state = ConversationState::idle();
    state.begin_email_entry();
    h.state_store.set(user(), &state).await.unwrap();

    // No text, no attachment: the state prefix alone must decide.
    let event = Event::Message(MessageEvent::empty(user()));
    let outcome = h.registry.dispatch(event).await;

    // The user-domain email handler answered (with a validation nudge),
    // proving the message was not silently ignored elsewhere.
    assert!(outcome.is_applicable());
    assert_eq!(outcome.error_code(), Some(ErrorCode::Validation));
}

#[tokio::test]
async fn email_flow_completes_and_clears_state() {
    let h = harness(&[]);
    let mut state = ConversationState::idle();
    state.begin_email_entry();
    h.state_store.set(user(), &state).await.unwrap();

    let outcome = h.registry.dispatch(text(user(), "user@example.com")).await;

    assert!(outcome.is_success());
    assert!(h.state_store.get(user()).await.unwrap().is_idle());
}

#[tokio::test]
async fn style_callback_requires_a_photo_credit() {
    let h = harness(&[]);
    register(&h, user(), 0, 0).await;

    let outcome = h.registry.dispatch(callback(user(), "style_anime")).await;

    assert!(!outcome.is_success());
    assert_eq!(outcome.error_code(), Some(ErrorCode::ResourceInsufficient));
    assert!(outcome.user_message().unwrap().contains("photos"));
    // The handler never ran, so no generation flow was started.
    assert!(h.state_store.get(user()).await.unwrap().is_idle());
}

#[tokio::test]
async fn style_callback_succeeds_with_credit() {
    let h = harness(&[]);
    register(&h, user(), 5, 0).await;

    let outcome = h.registry.dispatch(callback(user(), "style_anime")).await;

    assert!(outcome.is_success());
    assert_eq!(
        h.state_store.get(user()).await.unwrap().step_name(),
        Some("generation_style_chosen")
    );
}

#[tokio::test]
async fn photo_from_idle_registered_user_starts_upload_via_media_heuristic() {
    let h = harness(&[]);
    register(&h, user(), 1, 1).await;

    // Idle state: classification falls through to the media heuristic and
    // the generation media fallback starts the upload flow implicitly.
    let event = Event::Message(MessageEvent::from_attachments(
        user(),
        vec![Attachment::Photo { file_id: "f1".into() }],
    ));
    let outcome = h.registry.dispatch(event.clone()).await;

    assert!(outcome.is_applicable());
    assert_eq!(outcome.acknowledgment(), Some("Photo 1 of 10"));
    assert_eq!(
        h.state_store.get(user()).await.unwrap().step_name(),
        Some("awaiting_photos")
    );

    // The next photo continues the same flow through the state route.
    let outcome = h.registry.dispatch(event).await;
    assert_eq!(outcome.acknowledgment(), Some("Photo 2 of 10"));
}

#[tokio::test]
async fn photo_from_unregistered_user_is_rejected_softly() {
    let h = harness(&[]);

    let event = Event::Message(MessageEvent::from_attachments(
        user(),
        vec![Attachment::Photo { file_id: "f1".into() }],
    ));
    let outcome = h.registry.dispatch(event).await;

    assert_eq!(outcome.error_code(), Some(ErrorCode::Validation));
    assert!(h.state_store.get(user()).await.unwrap().is_idle());
}

#[tokio::test]
async fn admin_callback_from_unprivileged_user_is_denied() {
    let h = harness(&[900]);
    register(&h, user(), 0, 0).await;

    let outcome = h.registry.dispatch(callback(user(), "admin_stats")).await;

    assert!(!outcome.is_success());
    assert_eq!(outcome.error_code(), Some(ErrorCode::PermissionDenied));
    // The denial is still acknowledged, exactly once, as an alert.
    let acks = h.transport.acks().await;
    assert_eq!(acks.len(), 1);
    assert!(acks[0].1.alert);
}

#[tokio::test]
async fn admin_callback_from_privileged_user_succeeds() {
    let h = harness(&[500]);
    register(&h, user(), 0, 0).await;

    let outcome = h.registry.dispatch(callback(user(), "admin_stats")).await;

    assert!(outcome.is_success());
    assert_eq!(outcome.data().unwrap()["caller_registered"], true);
}

#[tokio::test]
async fn broadcast_flow_is_privileged_end_to_end() {
    let h = harness(&[500]);

    let outcome = h.registry.dispatch(text(user(), "/broadcast")).await;
    assert!(outcome.is_success());

    let outcome = h.registry.dispatch(text(user(), "Maintenance at noon")).await;
    assert!(outcome.is_success());
    assert_eq!(outcome.data().unwrap()["draft_len"], 19);

    // An unprivileged user never reaches the draft handler.
    let other = OriginatorId::new(501);
    let outcome = h.registry.dispatch(text(other, "/broadcast")).await;
    assert_eq!(outcome.error_code(), Some(ErrorCode::PermissionDenied));
}

#[tokio::test]
async fn start_command_resets_a_conversation_mid_flow() {
    let h = harness(&[]);
    let mut state = ConversationState::idle();
    state.begin_photo_upload(10);
    h.state_store.set(user(), &state).await.unwrap();

    let outcome = h.registry.dispatch(text(user(), "/start")).await;

    assert!(outcome.is_success());
    assert!(h.state_store.get(user()).await.unwrap().is_idle());
}

#[tokio::test]
async fn help_command_preserves_flow_progress() {
    let h = harness(&[]);
    let mut state = ConversationState::idle();
    state.begin_photo_upload(10);
    state.push_photo("f1");
    h.state_store.set(user(), &state).await.unwrap();

    let outcome = h.registry.dispatch(text(user(), "/help")).await;

    assert!(outcome.is_success());
    // The in-flight upload is untouched.
    assert_eq!(h.state_store.get(user()).await.unwrap(), state);
}

#[tokio::test]
async fn cancel_command_wins_over_active_state_routing() {
    let h = harness(&[]);
    let mut state = ConversationState::idle();
    state.begin_email_entry();
    h.state_store.set(user(), &state).await.unwrap();

    // "/cancel" classifies by command even though a state route exists.
    let outcome = h.registry.dispatch(text(user(), "/cancel")).await;

    assert!(outcome.is_success());
    assert_eq!(outcome.acknowledgment(), Some("Cancelled"));
    assert!(h.state_store.get(user()).await.unwrap().is_idle());
}

#[tokio::test]
async fn every_dispatched_event_is_acknowledged_at_most_once() {
    let h = harness(&[]);
    register(&h, user(), 1, 0).await;

    h.registry.dispatch(callback(user(), "style_anime")).await;
    h.registry.dispatch(callback(user(), "unknown_xyz")).await;
    h.registry.dispatch(text(user(), "/start")).await;

    // The unroutable callback never reached a pipeline, so it produced no
    // acknowledgment; the two handled events produced exactly one each.
    assert_eq!(h.transport.ack_count().await, 2);
}

#[tokio::test]
async fn unregistered_user_gets_soft_validation_on_guarded_routes() {
    let h = harness(&[]);

    let outcome = h.registry.dispatch(callback(user(), "tariff_comfort")).await;

    assert_eq!(outcome.error_code(), Some(ErrorCode::Validation));
    assert!(!outcome.should_alert_user());
    assert!(h.state_store.get(user()).await.unwrap().is_idle());
}

#[tokio::test]
async fn concurrent_users_do_not_share_state() {
    let h = harness(&[]);
    let registry = Arc::new(h.registry);
    let alice = OriginatorId::new(1);
    let bob = OriginatorId::new(2);
    register_pair(&h.directory, alice, bob).await;

    let r1 = {
        let registry = registry.clone();
        tokio::spawn(async move { registry.dispatch(callback(alice, "tariff_comfort")).await })
    };
    let r2 = {
        let registry = registry.clone();
        tokio::spawn(async move { registry.dispatch(callback(bob, "tariff_premium")).await })
    };
    r1.await.unwrap();
    r2.await.unwrap();

    let alice_state = h.state_store.get(alice).await.unwrap();
    let bob_state = h.state_store.get(bob).await.unwrap();
    assert_eq!(alice_state.step_name(), Some("awaiting_payment"));
    assert_eq!(bob_state.step_name(), Some("awaiting_payment"));
    assert_ne!(alice_state.context(), bob_state.context());
}

async fn register_pair(directory: &InMemoryUserDirectory, a: OriginatorId, b: OriginatorId) {
    directory.insert(UserRecord::new(a).with_balances(1, 0)).await;
    directory.insert(UserRecord::new(b).with_balances(1, 0)).await;
}
