//! Auth provider abstraction.
//!
//! The entire credential lifecycle is delegated to a hosted provider; this
//! crate never stores or verifies a password. The trait below is the seam:
//! production talks to the hosted service over HTTPS, tests plug in an
//! in-memory mock.

use crate::error::Result;
use crate::session_feed::SessionChanges;
use crate::state::{OAuthProvider, Session};

pub mod supabase;

pub use supabase::SupabaseProvider;

/// Hosted authentication provider.
///
/// Successful sign-ins and sign-outs are never returned from these calls;
/// they surface through the session feed obtained via
/// [`AuthProvider::subscribe`]. The calls themselves only report acceptance
/// or failure.
pub trait AuthProvider: Send + Sync {
    /// Fetch the current session, if any.
    ///
    /// Called once at startup for session restoration. Errors mean the
    /// provider is unreachable; callers settle on "no session".
    fn current_session(&self) -> impl std::future::Future<Output = Result<Option<Session>>> + Send;

    /// Subscribe to session changes.
    fn subscribe(&self) -> SessionChanges;

    /// Sign in with email and password.
    ///
    /// On success the new session is published to the feed.
    fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Create an account with email and password.
    ///
    /// The provider sends a confirmation email linking back to `redirect_to`;
    /// no session is created until the user confirms.
    fn sign_up_with_password(
        &self,
        email: &str,
        password: &str,
        redirect_to: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Request a password-reset email.
    ///
    /// Must succeed identically for registered and unregistered addresses.
    fn request_password_reset(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Begin the redirect-based OAuth flow.
    ///
    /// Returns the authorization URL the shell should navigate to.
    fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;

    /// Terminate the current session.
    ///
    /// On success a `None` session is published to the feed.
    fn sign_out(&self) -> impl std::future::Future<Output = Result<()>> + Send;
}
