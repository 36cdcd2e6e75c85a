//! Terminal shell for the cantina dashboard.
//!
//! A small REPL over the auth store: draft credentials, submit them, and
//! watch the session feed flip the screen between the form and the
//! dashboard.
//!
//! # Commands
//!
//! - `email <addr>` / `password <pw>`: edit the credential draft
//! - `submit`: submit the current form
//! - `create` / `forgot` / `back`: navigate between form variants
//! - `oauth google|github`: print the authorization URL to open
//! - `signout`, `quit`

mod dashboard;
mod view;

use anyhow::Result;
use cantina_auth::actions::AuthAction;
use cantina_auth::config::AuthConfig;
use cantina_auth::environment::AuthEnvironment;
use cantina_auth::providers::{AuthProvider, SupabaseProvider};
use cantina_auth::reducers::AuthReducer;
use cantina_auth::state::{AuthState, Mode, OAuthProvider};
use cantina_runtime::Store;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

type AuthStore =
    Store<AuthState, AuthAction, AuthEnvironment<SupabaseProvider>, AuthReducer<SupabaseProvider>>;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AuthConfig::from_env();
    let provider = SupabaseProvider::new(config.clone());
    let store: AuthStore = Store::new(
        AuthState::default(),
        AuthReducer::new(),
        AuthEnvironment::new(provider.clone(), config),
    );

    // Forward provider session changes into the store.
    let mut changes = provider.subscribe();
    let feed_store = store.clone();
    tokio::spawn(async move {
        while let Some(snapshot) = changes.next().await {
            if feed_store
                .send(AuthAction::SessionChanged {
                    session: snapshot.session,
                })
                .await
                .is_err()
            {
                break;
            }
        }
    });

    // Restore any existing session before first render.
    store
        .send_and_wait_for(
            AuthAction::Bootstrap,
            |action| matches!(action, AuthAction::SessionChanged { .. }),
            Duration::from_secs(5),
        )
        .await?;

    print!("{}", store.state(view::render).await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if !handle_command(&store, line.trim()).await? {
            break;
        }
        // Give in-flight session forwarding a moment to land.
        tokio::time::sleep(Duration::from_millis(50)).await;
        print!("{}", store.state(view::render).await);
    }

    store.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}

/// Dispatch one REPL command; returns `false` to exit.
async fn handle_command(store: &AuthStore, line: &str) -> Result<bool> {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

    match command {
        "" => {}
        "quit" => return Ok(false),
        "email" => {
            store
                .send(AuthAction::EmailChanged {
                    email: rest.to_string(),
                })
                .await?;
        }
        "password" => {
            store
                .send(AuthAction::PasswordChanged {
                    password: rest.to_string(),
                })
                .await?;
        }
        "create" => {
            store.send(AuthAction::SwitchMode { mode: Mode::SignUp }).await?;
        }
        "forgot" => {
            store
                .send(AuthAction::SwitchMode {
                    mode: Mode::ResetRequest,
                })
                .await?;
        }
        "back" => {
            store.send(AuthAction::SwitchMode { mode: Mode::SignIn }).await?;
        }
        "submit" => {
            let action = match store.state(|state| state.mode).await {
                Mode::SignIn => AuthAction::SubmitSignIn,
                Mode::SignUp => AuthAction::SubmitSignUp,
                Mode::ResetRequest => AuthAction::SubmitReset,
            };
            // Wait for the completion so the next render shows its feedback.
            wait_for_completion(store, action).await?;
        }
        "oauth" => match rest.parse::<OAuthProvider>() {
            Ok(oauth) => {
                let completion = store
                    .send_and_wait_for(
                        AuthAction::SubmitOAuth { provider: oauth },
                        |action| {
                            matches!(
                                action,
                                AuthAction::OAuthRedirectStarted { .. }
                                    | AuthAction::RequestFailed { .. }
                            )
                        },
                        Duration::from_secs(30),
                    )
                    .await?;
                if let AuthAction::OAuthRedirectStarted {
                    authorization_url, ..
                } = completion
                {
                    println!("open in a browser: {authorization_url}");
                }
            }
            Err(error) => println!("{error}"),
        },
        "signout" => {
            wait_for_completion(store, AuthAction::SignOut).await?;
        }
        other => println!("unknown command: {other}"),
    }

    Ok(true)
}

async fn wait_for_completion(store: &AuthStore, action: AuthAction) -> Result<()> {
    store
        .send_and_wait_for(
            action,
            |action| {
                matches!(
                    action,
                    AuthAction::SignInAccepted { .. }
                        | AuthAction::SignUpAccepted { .. }
                        | AuthAction::ResetAccepted { .. }
                        | AuthAction::SignOutAccepted { .. }
                        | AuthAction::RequestFailed { .. }
                )
            },
            Duration::from_secs(30),
        )
        .await?;
    Ok(())
}
