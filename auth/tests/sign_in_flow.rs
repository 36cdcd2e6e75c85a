//! Integration tests for the password sign-in and sign-out lifecycle.
//!
//! Drives the full stack: store, reducer, effect executor, and the mock
//! provider feed.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use cantina_auth::actions::AuthAction;
use cantina_auth::config::AuthConfig;
use cantina_auth::environment::AuthEnvironment;
use cantina_auth::mocks::MockAuthProvider;
use cantina_auth::providers::AuthProvider;
use cantina_auth::reducers::AuthReducer;
use cantina_auth::router::{route, Screen};
use cantina_auth::state::{AuthState, Feedback, Mode};
use cantina_runtime::Store;
use std::time::Duration;

type AuthStore = Store<AuthState, AuthAction, AuthEnvironment<MockAuthProvider>, AuthReducer<MockAuthProvider>>;

fn store_with(provider: MockAuthProvider) -> AuthStore {
    let config = AuthConfig::new("https://example.supabase.co", "anon");
    Store::new(
        AuthState::default(),
        AuthReducer::new(),
        AuthEnvironment::new(provider, config),
    )
}

/// Forward feed snapshots into the store, the way the app shell does.
fn spawn_session_forwarder(provider: &MockAuthProvider, store: AuthStore) {
    let mut changes = provider.subscribe();
    tokio::spawn(async move {
        while let Some(snapshot) = changes.next().await {
            let _ = store
                .send(AuthAction::SessionChanged {
                    session: snapshot.session,
                })
                .await;
        }
    });
}

#[tokio::test]
async fn rejected_credentials_surface_as_error_feedback() {
    let provider = MockAuthProvider::new();
    provider.register_user("ana@example.com", "hunter2");
    let store = store_with(provider);

    store
        .send(AuthAction::EmailChanged {
            email: "ana@example.com".to_string(),
        })
        .await
        .expect("send");
    store
        .send(AuthAction::PasswordChanged {
            password: "wrong".to_string(),
        })
        .await
        .expect("send");

    let completion = store
        .send_and_wait_for(
            AuthAction::SubmitSignIn,
            |action| matches!(action, AuthAction::RequestFailed { .. }),
            Duration::from_secs(1),
        )
        .await
        .expect("completion");

    match completion {
        AuthAction::RequestFailed { message, .. } => {
            assert_eq!(message, "Invalid login credentials");
        }
        other => panic!("unexpected completion: {other:?}"),
    }

    store
        .state(|state| {
            assert_eq!(
                state.feedback,
                Feedback::Error("Invalid login credentials".to_string())
            );
            assert!(!state.loading);
            assert!(state.session.is_none());
            // Still on the sign-in form with the draft intact.
            assert_eq!(route(state), Screen::AuthForm(Mode::SignIn));
            assert_eq!(state.draft.email, "ana@example.com");
        })
        .await;
}

#[tokio::test]
async fn accepted_credentials_reach_the_dashboard() {
    let provider = MockAuthProvider::new();
    provider.register_user("ana@example.com", "hunter2");
    let store = store_with(provider.clone());
    spawn_session_forwarder(&provider, store.clone());

    store
        .send(AuthAction::EmailChanged {
            email: "ana@example.com".to_string(),
        })
        .await
        .expect("send");
    store
        .send(AuthAction::PasswordChanged {
            password: "hunter2".to_string(),
        })
        .await
        .expect("send");

    store
        .send_and_wait_for(
            AuthAction::SubmitSignIn,
            |action| matches!(action, AuthAction::SignInAccepted { .. }),
            Duration::from_secs(1),
        )
        .await
        .expect("acceptance");

    // The session travels feed → forwarder → SessionChanged.
    let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
    loop {
        let signed_in = store.state(|state| state.session.is_some()).await;
        if signed_in {
            break;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "session never arrived"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    store
        .state(|state| {
            assert_eq!(route(state), Screen::Dashboard);
            assert!(state.feedback.is_none());
            let session = state.session.as_ref().expect("signed in");
            assert_eq!(session.user.email, "ana@example.com");
        })
        .await;
}

#[tokio::test]
async fn sign_out_returns_to_the_form_in_its_last_mode() {
    let provider = MockAuthProvider::new();
    let store = store_with(provider.clone());
    spawn_session_forwarder(&provider, store.clone());

    // Leave the form on sign-up, then start a session on top of it.
    store
        .send(AuthAction::SwitchMode { mode: Mode::SignUp })
        .await
        .expect("send");
    let session = provider.sample_session("ana@example.com");
    store
        .send(AuthAction::SessionChanged {
            session: Some(session),
        })
        .await
        .expect("send");
    assert_eq!(store.state(route).await, Screen::Dashboard);

    store
        .send_and_wait_for(
            AuthAction::SignOut,
            |action| matches!(action, AuthAction::SignOutAccepted { .. }),
            Duration::from_secs(1),
        )
        .await
        .expect("acceptance");

    let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
    loop {
        let signed_out = store.state(|state| state.session.is_none()).await;
        if signed_out {
            break;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "session never cleared"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    // The mode was never navigated away from sign-up, so that is the form
    // that reappears.
    assert_eq!(store.state(route).await, Screen::AuthForm(Mode::SignUp));
}

#[tokio::test]
async fn session_pushed_mid_sign_up_shows_the_dashboard() {
    let provider = MockAuthProvider::new();
    let store = store_with(provider.clone());
    spawn_session_forwarder(&provider, store.clone());

    store
        .send(AuthAction::SwitchMode { mode: Mode::SignUp })
        .await
        .expect("send");
    assert_eq!(store.state(route).await, Screen::AuthForm(Mode::SignUp));

    // A confirmed-elsewhere session lands through the feed while the user is
    // still on the sign-up form.
    provider.push_session(Some(provider.sample_session("ana@example.com")));

    let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
    loop {
        if store.state(|state| state.session.is_some()).await {
            break;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "session never arrived"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(store.state(route).await, Screen::Dashboard);
}

#[tokio::test]
async fn failed_sign_out_keeps_the_session() {
    let provider = MockAuthProvider::new();
    let store = store_with(provider.clone());

    let session = provider.sample_session("ana@example.com");
    store
        .send(AuthAction::SessionChanged {
            session: Some(session),
        })
        .await
        .expect("send");

    provider.fail_next_with("Service unavailable");
    let completion = store
        .send_and_wait_for(
            AuthAction::SignOut,
            |action| matches!(action, AuthAction::RequestFailed { .. }),
            Duration::from_secs(1),
        )
        .await
        .expect("completion");

    assert!(matches!(completion, AuthAction::RequestFailed { .. }));
    store
        .state(|state| {
            assert!(state.session.is_some());
            assert_eq!(
                state.feedback,
                Feedback::Error("Service unavailable".to_string())
            );
        })
        .await;
}

#[tokio::test]
async fn bootstrap_restores_an_existing_session() {
    let provider = MockAuthProvider::new();
    provider.push_session(Some(provider.sample_session("ana@example.com")));
    let store = store_with(provider);

    store
        .send_and_wait_for(
            AuthAction::Bootstrap,
            |action| matches!(action, AuthAction::SessionChanged { .. }),
            Duration::from_secs(1),
        )
        .await
        .expect("restoration");

    assert_eq!(store.state(route).await, Screen::Dashboard);
}

#[tokio::test]
async fn bootstrap_settles_signed_out_when_provider_unreachable() {
    let provider = MockAuthProvider::new();
    provider.fail_next_with("connection refused");
    let store = store_with(provider);

    let completion = store
        .send_and_wait_for(
            AuthAction::Bootstrap,
            |action| matches!(action, AuthAction::SessionChanged { .. }),
            Duration::from_secs(1),
        )
        .await
        .expect("settles");

    assert_eq!(completion, AuthAction::SessionChanged { session: None });
    store
        .state(|state| {
            assert_eq!(route(state), Screen::AuthForm(Mode::SignIn));
            // Restoration failure is silent; the form shows no error.
            assert!(state.feedback.is_none());
        })
        .await;
}
