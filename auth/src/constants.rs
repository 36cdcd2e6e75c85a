//! Authentication constants.

/// Environment variable holding the provider project URL.
pub const ENV_SUPABASE_URL: &str = "CANTINA_SUPABASE_URL";

/// Environment variable holding the provider anon (publishable) key.
pub const ENV_SUPABASE_ANON_KEY: &str = "CANTINA_SUPABASE_ANON_KEY";

/// Default redirect base when none is configured.
pub const DEFAULT_REDIRECT_BASE: &str = "http://localhost:3000";

/// Path fragment appended to the redirect base for password-reset links.
///
/// The reset email sends the user back here to choose a new password.
pub const RESET_REDIRECT_PATH: &str = "/#/update-password";

/// User-facing feedback messages.
pub mod messages {
    /// Shown after a successful sign-up request.
    pub const SIGN_UP_CONFIRMATION: &str = "Check your email to confirm your account";

    /// Shown after a password-reset request, registered or not.
    ///
    /// Deliberately noncommittal so the form cannot be used to probe which
    /// emails have accounts.
    pub const RESET_CONFIRMATION: &str = "If the email exists, we sent you a recovery link";
}
