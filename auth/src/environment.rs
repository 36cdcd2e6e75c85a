//! Authentication environment.

use crate::config::AuthConfig;
use crate::providers::AuthProvider;

/// Dependencies injected into the auth reducer.
///
/// The reducer never performs I/O itself; effects capture clones of these
/// dependencies and run against them on the executor.
#[derive(Clone)]
pub struct AuthEnvironment<P: AuthProvider + Clone> {
    /// Hosted auth provider.
    pub provider: P,

    /// Provider endpoint and redirect configuration.
    pub config: AuthConfig,
}

impl<P: AuthProvider + Clone> AuthEnvironment<P> {
    /// Create an environment.
    pub fn new(provider: P, config: AuthConfig) -> Self {
        Self { provider, config }
    }
}
