//! # Cantina Auth
//!
//! Session control for the cantina dashboard, delegating all credential
//! handling to a hosted auth provider.
//!
//! ## Architecture
//!
//! Authentication is implemented as a reducer and effects:
//!
//! ```text
//! Action → Reducer → (State, Effects) → Effect Execution → More Actions
//! ```
//!
//! The reducer owns form state, feedback, and the request-supersession
//! discipline; the provider owns credentials and sessions. Sessions flow one
//! way, from the provider's feed into state via `SessionChanged`.
//!
//! ## Example: Password Sign-In
//!
//! ```rust,ignore
//! use cantina_auth::{actions::AuthAction, reducers::AuthReducer, state::AuthState};
//!
//! // 1. Draft credentials
//! let effects = reducer.reduce(&mut state, AuthAction::EmailChanged { email }, &env);
//! let effects = reducer.reduce(&mut state, AuthAction::PasswordChanged { password }, &env);
//!
//! // 2. Submit (one provider call, no retry)
//! let effects = reducer.reduce(&mut state, AuthAction::SubmitSignIn, &env);
//!
//! // 3. The session arrives through the provider feed as SessionChanged
//! ```
//!
//! ## Testing
//!
//! With the `test-utils` feature (default), [`mocks::MockAuthProvider`]
//! drives the full controller at memory speed.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod actions;
pub mod config;
pub mod constants;
pub mod environment;
pub mod error;
pub mod providers;
pub mod reducers;
pub mod router;
pub mod session_feed;
pub mod state;

#[cfg(feature = "test-utils")]
pub mod mocks;

pub use actions::AuthAction;
pub use config::AuthConfig;
pub use environment::AuthEnvironment;
pub use error::{AuthError, Result};
pub use providers::{AuthProvider, SupabaseProvider};
pub use reducers::AuthReducer;
pub use router::{route, Screen};
pub use session_feed::{SessionChanges, SessionFeed, SessionSnapshot};
pub use state::{AuthState, Feedback, Mode, OAuthProvider, Session};
