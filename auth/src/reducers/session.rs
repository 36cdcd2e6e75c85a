//! Session controller reducer.
//!
//! The single reducer driving the auth surface: form navigation, credential
//! drafting, provider commands, and the feedback discipline around their
//! completions.
//!
//! # Flow
//!
//! 1. A submit command stamps a fresh request ID, raises the loading flag,
//!    and clears feedback
//! 2. One effect calls the provider; success and failure both come back as
//!    completion events carrying that request ID
//! 3. Completions for a superseded request are discarded, so the visible
//!    feedback always belongs to the most recent command
//!
//! Sessions never travel through completions. The provider publishes them to
//! its feed, and they enter here as `SessionChanged`.

use crate::actions::AuthAction;
use crate::constants::messages;
use crate::environment::AuthEnvironment;
use crate::providers::AuthProvider;
use crate::state::{AuthState, Feedback};
use cantina_core::effect::Effect;
use cantina_core::reducer::Reducer;
use cantina_core::{smallvec, SmallVec};

/// Session controller reducer.
///
/// Generic over the provider so tests can substitute an in-memory mock.
#[derive(Debug, Clone)]
pub struct AuthReducer<P> {
    /// Phantom data to hold the provider type parameter.
    _phantom: std::marker::PhantomData<P>,
}

impl<P> AuthReducer<P> {
    /// Create a new session controller reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<P> Default for AuthReducer<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Reducer for AuthReducer<P>
where
    P: AuthProvider + Clone + 'static,
{
    type State = AuthState;
    type Action = AuthAction;
    type Environment = AuthEnvironment<P>;

    #[allow(clippy::too_many_lines)]
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // Bootstrap: restore the session once at startup
            // ═══════════════════════════════════════════════════════════════
            AuthAction::Bootstrap => {
                let provider = env.provider.clone();

                smallvec![Effect::future(async move {
                    match provider.current_session().await {
                        Ok(session) => Some(AuthAction::SessionChanged { session }),
                        Err(error) => {
                            // Unreachable provider settles as signed out.
                            tracing::warn!(error = %error, "session restoration failed");
                            Some(AuthAction::SessionChanged { session: None })
                        }
                    }
                })]
            }

            // ═══════════════════════════════════════════════════════════════
            // SessionChanged: the provider's word is final
            // ═══════════════════════════════════════════════════════════════
            AuthAction::SessionChanged { session } => {
                state.session = session;
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // Form interaction
            // ═══════════════════════════════════════════════════════════════
            AuthAction::SwitchMode { mode } => {
                // Navigation only moves between forms; feedback stays visible
                // until the next provider command clears it.
                if state.mode.can_navigate_to(mode) {
                    state.mode = mode;
                } else {
                    tracing::debug!(from = ?state.mode, to = ?mode, "ignoring navigation");
                }
                smallvec![Effect::None]
            }

            AuthAction::EmailChanged { email } => {
                state.draft.email = email;
                smallvec![Effect::None]
            }

            AuthAction::PasswordChanged { password } => {
                state.draft.password = password;
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // Provider commands: stamp a request, fire one effect, no retry
            // ═══════════════════════════════════════════════════════════════
            AuthAction::SubmitSignIn => {
                let request = state.begin_request();
                let provider = env.provider.clone();
                let email = state.draft.email.clone();
                let password = state.draft.password.clone();

                smallvec![Effect::future(async move {
                    match provider.sign_in_with_password(&email, &password).await {
                        Ok(()) => Some(AuthAction::SignInAccepted { request }),
                        Err(error) => Some(AuthAction::RequestFailed {
                            request,
                            message: error.message().to_owned(),
                        }),
                    }
                })]
            }

            AuthAction::SubmitSignUp => {
                let request = state.begin_request();
                let provider = env.provider.clone();
                let email = state.draft.email.clone();
                let password = state.draft.password.clone();
                let redirect_to = env.config.redirect_base.clone();

                smallvec![Effect::future(async move {
                    match provider
                        .sign_up_with_password(&email, &password, &redirect_to)
                        .await
                    {
                        Ok(()) => Some(AuthAction::SignUpAccepted { request }),
                        Err(error) => Some(AuthAction::RequestFailed {
                            request,
                            message: error.message().to_owned(),
                        }),
                    }
                })]
            }

            AuthAction::SubmitReset => {
                let request = state.begin_request();
                let provider = env.provider.clone();
                let email = state.draft.email.clone();
                let redirect_to = env.config.reset_redirect();

                smallvec![Effect::future(async move {
                    match provider.request_password_reset(&email, &redirect_to).await {
                        Ok(()) => Some(AuthAction::ResetAccepted { request }),
                        Err(error) => Some(AuthAction::RequestFailed {
                            request,
                            message: error.message().to_owned(),
                        }),
                    }
                })]
            }

            AuthAction::SubmitOAuth { provider: oauth } => {
                let request = state.begin_request();
                let provider = env.provider.clone();
                let redirect_to = env.config.redirect_base.clone();

                smallvec![Effect::future(async move {
                    match provider.sign_in_with_oauth(oauth, &redirect_to).await {
                        Ok(authorization_url) => Some(AuthAction::OAuthRedirectStarted {
                            request,
                            authorization_url,
                        }),
                        Err(error) => Some(AuthAction::RequestFailed {
                            request,
                            message: error.message().to_owned(),
                        }),
                    }
                })]
            }

            AuthAction::SignOut => {
                let request = state.begin_request();
                let provider = env.provider.clone();

                smallvec![Effect::future(async move {
                    match provider.sign_out().await {
                        Ok(()) => Some(AuthAction::SignOutAccepted { request }),
                        Err(error) => Some(AuthAction::RequestFailed {
                            request,
                            message: error.message().to_owned(),
                        }),
                    }
                })]
            }

            // ═══════════════════════════════════════════════════════════════
            // Provider events: only the current request may touch feedback
            // ═══════════════════════════════════════════════════════════════
            AuthAction::SignInAccepted { request } => {
                if state.is_current(request) {
                    // Session arrives separately via SessionChanged.
                    state.loading = false;
                } else {
                    tracing::debug!(?request, "discarding stale completion");
                }
                smallvec![Effect::None]
            }

            AuthAction::SignUpAccepted { request } => {
                if state.is_current(request) {
                    state.loading = false;
                    state.feedback = Feedback::Info(messages::SIGN_UP_CONFIRMATION.to_string());
                } else {
                    tracing::debug!(?request, "discarding stale completion");
                }
                smallvec![Effect::None]
            }

            AuthAction::ResetAccepted { request } => {
                if state.is_current(request) {
                    state.loading = false;
                    state.feedback = Feedback::Info(messages::RESET_CONFIRMATION.to_string());
                } else {
                    tracing::debug!(?request, "discarding stale completion");
                }
                smallvec![Effect::None]
            }

            AuthAction::OAuthRedirectStarted { request, .. } => {
                // The browser is navigating away; loading stays raised until
                // it happens. The URL itself is consumed by the shell, which
                // observes this action through the store's broadcast.
                if !state.is_current(request) {
                    tracing::debug!(?request, "discarding stale completion");
                }
                smallvec![Effect::None]
            }

            AuthAction::SignOutAccepted { request } => {
                // The mode is left alone; only explicit navigation changes
                // it, so the form reappears in whatever variant it was left.
                if state.is_current(request) {
                    state.loading = false;
                } else {
                    tracing::debug!(?request, "discarding stale completion");
                }
                smallvec![Effect::None]
            }

            AuthAction::RequestFailed { request, message } => {
                if state.is_current(request) {
                    state.loading = false;
                    state.feedback = Feedback::Error(message);
                } else {
                    tracing::debug!(?request, "discarding stale completion");
                }
                smallvec![Effect::None]
            }
        }
    }
}
