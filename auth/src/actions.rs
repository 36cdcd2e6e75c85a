//! Authentication actions.
//!
//! This module defines all possible inputs to the session controller.
//! Actions split into **commands** (user intent) and **events** (outcomes of
//! async provider calls, fed back by the effect executor).

use crate::state::{Mode, OAuthProvider, RequestId, Session};
use serde::{Deserialize, Serialize};

/// Authentication action.
///
/// Actions are the **only** way to communicate with the session controller.
/// The reducer is a pure function: `(State, Action, Env) → (State, Effects)`.
///
/// Completion events carry the [`RequestId`] stamped by their originating
/// command; the reducer discards completions that a newer command has
/// superseded, so feedback is last-issued-wins rather than last-finished-wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AuthAction {
    // ═══════════════════════════════════════════════════════════════════════
    // Lifecycle
    // ═══════════════════════════════════════════════════════════════════════
    /// Fetch the current session from the provider at startup.
    ///
    /// Settles on "no session" if the provider is unreachable; there is no
    /// retry.
    Bootstrap,

    /// The provider pushed a session change.
    ///
    /// This is how every successful sign-in and sign-out lands: the session
    /// arrives through the provider's feed, never as a direct call result.
    /// `None` signals sign-out or expiry.
    SessionChanged {
        /// The new session, replacing the cached one wholesale.
        session: Option<Session>,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // Form Interaction
    // ═══════════════════════════════════════════════════════════════════════
    /// Navigate between auth form variants.
    ///
    /// Only the edges the form offers are honored (see
    /// [`Mode::can_navigate_to`]); anything else is a no-op. The credential
    /// draft is never touched by navigation.
    SwitchMode {
        /// Target form variant.
        mode: Mode,
    },

    /// Email field edited.
    EmailChanged {
        /// New field contents.
        email: String,
    },

    /// Password field edited.
    PasswordChanged {
        /// New field contents.
        password: String,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // Provider Commands
    // ═══════════════════════════════════════════════════════════════════════
    /// Submit the sign-in form with the current credential draft.
    SubmitSignIn,

    /// Submit the sign-up form with the current credential draft.
    ///
    /// The provider requires email confirmation, so success yields an info
    /// message rather than a session.
    SubmitSignUp,

    /// Request a password-reset email for the drafted email address.
    SubmitReset,

    /// Start the redirect-based OAuth flow with the given provider.
    SubmitOAuth {
        /// Which OAuth provider to use.
        provider: OAuthProvider,
    },

    /// Request session termination.
    ///
    /// The cleared session arrives via [`AuthAction::SessionChanged`].
    SignOut,

    // ═══════════════════════════════════════════════════════════════════════
    // Provider Events
    // ═══════════════════════════════════════════════════════════════════════
    /// Password sign-in was accepted.
    ///
    /// Clears the loading flag only; the session itself arrives via
    /// [`AuthAction::SessionChanged`].
    SignInAccepted {
        /// Originating request.
        request: RequestId,
    },

    /// Sign-up was accepted; a confirmation email is on its way.
    SignUpAccepted {
        /// Originating request.
        request: RequestId,
    },

    /// Password-reset request was accepted.
    ///
    /// Emitted with the same fixed message whether or not the email is
    /// registered, to prevent account enumeration.
    ResetAccepted {
        /// Originating request.
        request: RequestId,
    },

    /// The OAuth authorization URL is ready; the shell should open it and
    /// the browser navigates away.
    OAuthRedirectStarted {
        /// Originating request.
        request: RequestId,

        /// Full authorization URL to open.
        authorization_url: String,
    },

    /// Sign-out was accepted by the provider.
    SignOutAccepted {
        /// Originating request.
        request: RequestId,
    },

    /// A provider operation failed.
    ///
    /// The single error kind of the system; `message` is the provider's
    /// human-readable text, displayed verbatim.
    RequestFailed {
        /// Originating request.
        request: RequestId,

        /// Provider-supplied message.
        message: String,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn action_serialization_round_trip() {
        let action = AuthAction::RequestFailed {
            request: RequestId(7),
            message: "Invalid login credentials".to_string(),
        };

        let json = serde_json::to_string(&action).expect("serialize");
        let deserialized: AuthAction = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(action, deserialized);
    }
}
