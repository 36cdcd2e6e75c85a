//! Authentication state types.
//!
//! This module defines the state owned by the session controller.
//! All types are `Clone` to support the functional architecture pattern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for a user, issued by the hosted provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub uuid::Uuid);

impl UserId {
    /// Generate a new random `UserId` (used by test fixtures; production ids
    /// come from the provider).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// Monotonic identifier for an in-flight provider request.
///
/// Every command that talks to the provider stamps a fresh `RequestId`;
/// completion events carry it back so the reducer can discard completions
/// that a newer request has superseded.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RequestId(pub u64);

impl RequestId {
    /// The successor id.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Core State Types
// ═══════════════════════════════════════════════════════════════════════

/// The currently displayed auth form variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Password sign-in form.
    #[default]
    SignIn,
    /// Account creation form.
    SignUp,
    /// Password-reset request form.
    ResetRequest,
}

impl Mode {
    /// Form title shown above the auth card.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::SignIn => "Sign in",
            Self::SignUp => "Create account",
            Self::ResetRequest => "Recover password",
        }
    }

    /// Whether a navigation link exists from `self` to `target`.
    ///
    /// The form offers: sign-in ↔ sign-up and sign-in ↔ reset-request.
    /// There is no direct edge between sign-up and reset-request.
    #[must_use]
    pub const fn can_navigate_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::SignIn, Self::SignUp)
                | (Self::SignUp, Self::SignIn)
                | (Self::SignIn, Self::ResetRequest)
                | (Self::ResetRequest, Self::SignIn)
        )
    }
}

/// Transient error/info message shown after an action.
///
/// Modelled as an enum so "at most one of error and info is set" holds by
/// construction rather than by discipline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    /// Nothing to show.
    #[default]
    None,
    /// The provider rejected or failed the last action.
    Error(String),
    /// The last action succeeded with a message for the user.
    Info(String),
}

impl Feedback {
    /// The error text, if feedback is an error.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    /// The info text, if feedback is informational.
    #[must_use]
    pub fn info(&self) -> Option<&str> {
        match self {
            Self::Info(message) => Some(message),
            _ => None,
        }
    }

    /// Whether there is nothing to show.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Transient (email, password) pair held while the user fills the form.
///
/// Deliberately preserved across submits and mode switches; only a fresh
/// state clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialDraft {
    /// Email field contents.
    pub email: String,
    /// Password field contents.
    pub password: String,
}

/// User session, issued and owned by the hosted provider.
///
/// The application holds a read-only cache, replaced wholesale on every
/// provider push and cleared on sign-out or expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for authenticated provider calls.
    pub access_token: String,

    /// Token type (always "bearer" for the hosted provider).
    pub token_type: String,

    /// Token used to mint a replacement session.
    pub refresh_token: String,

    /// Access-token expiry.
    pub expires_at: DateTime<Utc>,

    /// The authenticated user.
    pub user: UserProfile,
}

/// Minimal profile of the authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Provider-issued user id.
    pub id: UserId,

    /// User's email address.
    pub email: String,
}

/// OAuth provider id for redirect-based sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OAuthProvider {
    /// Google OAuth.
    Google,
    /// GitHub OAuth.
    GitHub,
}

impl OAuthProvider {
    /// Get the provider name as the hosted backend expects it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::GitHub => "github",
        }
    }
}

impl std::str::FromStr for OAuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "github" => Ok(Self::GitHub),
            _ => Err(format!("Unknown OAuth provider: {s}")),
        }
    }
}

impl std::fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root state for the session controller and mode state machine.
///
/// # Examples
///
/// ```
/// # use cantina_auth::{AuthState, Mode};
/// let state = AuthState::default();
/// assert!(state.session.is_none());
/// assert_eq!(state.mode, Mode::SignIn);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    /// Current session (if signed in). Presence alone decides the top-level
    /// screen; `mode` is irrelevant while this is `Some`.
    pub session: Option<Session>,

    /// Currently displayed auth form variant.
    pub mode: Mode,

    /// Credential form fields.
    pub draft: CredentialDraft,

    /// Outcome of the most recent action, last-write-wins.
    pub feedback: Feedback,

    /// Whether a provider request is in flight.
    pub loading: bool,

    /// Most recently issued request id. Completions carrying an older id
    /// are stale and discarded.
    pub last_request: RequestId,
}

impl AuthState {
    /// Start a new provider request: clears feedback, sets the loading flag,
    /// and stamps a fresh request id.
    pub fn begin_request(&mut self) -> RequestId {
        self.last_request = self.last_request.next();
        self.loading = true;
        self.feedback = Feedback::None;
        self.last_request
    }

    /// Whether a completion for `request` is still current.
    #[must_use]
    pub const fn is_current(&self, request: RequestId) -> bool {
        self.last_request.0 == request.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_are_monotonic() {
        let mut state = AuthState::default();
        let first = state.begin_request();
        let second = state.begin_request();

        assert!(second > first);
        assert!(state.is_current(second));
        assert!(!state.is_current(first));
    }

    #[test]
    fn begin_request_clears_feedback_and_sets_loading() {
        let mut state = AuthState {
            feedback: Feedback::Error("boom".to_string()),
            ..AuthState::default()
        };

        state.begin_request();

        assert!(state.feedback.is_none());
        assert!(state.loading);
    }

    #[test]
    fn feedback_error_and_info_are_mutually_exclusive() {
        // Structural: a Feedback value cannot hold both.
        let error = Feedback::Error("bad".to_string());
        assert_eq!(error.error(), Some("bad"));
        assert_eq!(error.info(), None);

        let info = Feedback::Info("ok".to_string());
        assert_eq!(info.info(), Some("ok"));
        assert_eq!(info.error(), None);
    }

    #[test]
    fn mode_navigation_edges() {
        assert!(Mode::SignIn.can_navigate_to(Mode::SignUp));
        assert!(Mode::SignUp.can_navigate_to(Mode::SignIn));
        assert!(Mode::SignIn.can_navigate_to(Mode::ResetRequest));
        assert!(Mode::ResetRequest.can_navigate_to(Mode::SignIn));

        // No direct edge between sign-up and reset-request.
        assert!(!Mode::SignUp.can_navigate_to(Mode::ResetRequest));
        assert!(!Mode::ResetRequest.can_navigate_to(Mode::SignUp));
    }

    #[test]
    fn mode_titles() {
        assert_eq!(Mode::SignIn.title(), "Sign in");
        assert_eq!(Mode::SignUp.title(), "Create account");
        assert_eq!(Mode::ResetRequest.title(), "Recover password");
    }

    #[test]
    fn oauth_provider_round_trip() {
        assert_eq!(OAuthProvider::Google.as_str(), "google");
        assert_eq!("github".parse::<OAuthProvider>(), Ok(OAuthProvider::GitHub));
        assert!("microsoft".parse::<OAuthProvider>().is_err());
    }
}
