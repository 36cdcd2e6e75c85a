//! Authentication configuration.

use crate::constants::{
    DEFAULT_REDIRECT_BASE, ENV_SUPABASE_ANON_KEY, ENV_SUPABASE_URL, RESET_REDIRECT_PATH,
};

/// Configuration for the hosted auth provider.
///
/// All auth traffic goes to a single provider project identified by its URL
/// and anon key. The anon key is a publishable credential: it scopes requests
/// to the project but grants nothing by itself.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Base URL of the provider project (e.g. `https://xyz.supabase.co`).
    pub endpoint_url: String,

    /// Publishable anon key sent with every request.
    pub anon_key: String,

    /// Origin the provider redirects back to after email confirmation and
    /// OAuth.
    pub redirect_base: String,
}

impl AuthConfig {
    /// Create a configuration with explicit values.
    pub fn new(endpoint_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            anon_key: anon_key.into(),
            redirect_base: DEFAULT_REDIRECT_BASE.to_string(),
        }
    }

    /// Load configuration from the environment.
    ///
    /// Missing variables are tolerated at startup. The resulting config will
    /// fail at the provider boundary instead, which surfaces as ordinary form
    /// feedback rather than a crash.
    #[must_use]
    pub fn from_env() -> Self {
        let endpoint_url = std::env::var(ENV_SUPABASE_URL).unwrap_or_default();
        let anon_key = std::env::var(ENV_SUPABASE_ANON_KEY).unwrap_or_default();

        if endpoint_url.is_empty() || anon_key.is_empty() {
            tracing::warn!(
                url_var = ENV_SUPABASE_URL,
                key_var = ENV_SUPABASE_ANON_KEY,
                "auth provider credentials not configured; provider calls will fail"
            );
        }

        Self {
            endpoint_url,
            anon_key,
            redirect_base: DEFAULT_REDIRECT_BASE.to_string(),
        }
    }

    /// Override the redirect base.
    #[must_use]
    pub fn with_redirect_base(mut self, redirect_base: impl Into<String>) -> Self {
        self.redirect_base = redirect_base.into();
        self
    }

    /// Full redirect URL for password-reset emails.
    #[must_use]
    pub fn reset_redirect(&self) -> String {
        format!("{}{}", self.redirect_base, RESET_REDIRECT_PATH)
    }
}
