//! In-memory mock auth provider.

use crate::error::{AuthError, Result};
use crate::providers::AuthProvider;
use crate::session_feed::{SessionChanges, SessionFeed};
use crate::state::{OAuthProvider, Session, UserId, UserProfile};
use cantina_core::environment::Clock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Lock the mutex, mapping poisoning to a provider error.
fn lock<T>(mutex: &Mutex<T>) -> Result<std::sync::MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| AuthError::provider("mock provider lock poisoned"))
}

#[derive(Debug, Default)]
struct Inner {
    /// Registered email → password pairs accepted by sign-in.
    users: HashMap<String, String>,

    /// Emails sign-up was requested for.
    sign_ups: Vec<String>,

    /// Emails a reset link was requested for.
    reset_requests: Vec<String>,

    /// When set, the next provider call fails with this message.
    fail_next: Option<String>,
}

/// In-memory mock of the hosted auth provider.
///
/// Behaves like the real thing at the seam: successful sign-ins publish a
/// session to the feed, sign-out publishes `None`, reset requests succeed
/// for unknown emails too, and failures carry displayable messages.
#[derive(Clone)]
pub struct MockAuthProvider {
    inner: Arc<Mutex<Inner>>,
    feed: Arc<SessionFeed>,
    clock: Arc<dyn Clock>,
}

impl MockAuthProvider {
    /// Create an empty mock with no registered users.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            feed: Arc::new(SessionFeed::new()),
            clock: Arc::new(cantina_core::environment::SystemClock),
        }
    }

    /// Use a fixed clock for deterministic session expiries.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Register credentials that sign-in will accept.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn register_user(&self, email: &str, password: &str) {
        #[allow(clippy::unwrap_used)]
        self.inner
            .lock()
            .unwrap()
            .users
            .insert(email.to_string(), password.to_string());
    }

    /// Make the next provider call fail with the given message.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn fail_next_with(&self, message: &str) {
        #[allow(clippy::unwrap_used)]
        {
            self.inner.lock().unwrap().fail_next = Some(message.to_string());
        }
    }

    /// Publish a session directly, as if restored or confirmed externally.
    pub fn push_session(&self, session: Option<Session>) {
        self.feed.publish(session);
    }

    /// Build a plausible session for the given email.
    #[must_use]
    pub fn sample_session(&self, email: &str) -> Session {
        Session {
            access_token: format!("mock-access-{}", uuid::Uuid::new_v4()),
            token_type: "bearer".to_string(),
            refresh_token: format!("mock-refresh-{}", uuid::Uuid::new_v4()),
            expires_at: self.clock.now() + chrono::Duration::hours(1),
            user: UserProfile {
                id: UserId::new(),
                email: email.to_string(),
            },
        }
    }

    /// Emails sign-up was requested for, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn sign_ups(&self) -> Vec<String> {
        #[allow(clippy::unwrap_used)]
        self.inner.lock().unwrap().sign_ups.clone()
    }

    /// Emails a reset link was requested for, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn reset_requests(&self) -> Vec<String> {
        #[allow(clippy::unwrap_used)]
        self.inner.lock().unwrap().reset_requests.clone()
    }

    fn take_failure(&self) -> Result<()> {
        let mut inner = lock(&self.inner)?;
        match inner.fail_next.take() {
            Some(message) => Err(AuthError::provider(message)),
            None => Ok(()),
        }
    }
}

impl Default for MockAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockAuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockAuthProvider").finish_non_exhaustive()
    }
}

impl AuthProvider for MockAuthProvider {
    async fn current_session(&self) -> Result<Option<Session>> {
        self.take_failure()?;
        Ok(self.feed.current().session)
    }

    fn subscribe(&self) -> SessionChanges {
        self.feed.subscribe()
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<()> {
        self.take_failure()?;

        let accepted = {
            let inner = lock(&self.inner)?;
            inner.users.get(email).is_some_and(|stored| stored == password)
        };

        if !accepted {
            return Err(AuthError::provider("Invalid login credentials"));
        }

        self.feed.publish(Some(self.sample_session(email)));
        Ok(())
    }

    async fn sign_up_with_password(
        &self,
        email: &str,
        _password: &str,
        _redirect_to: &str,
    ) -> Result<()> {
        self.take_failure()?;
        lock(&self.inner)?.sign_ups.push(email.to_string());
        // Confirmation pending; no session yet.
        Ok(())
    }

    async fn request_password_reset(&self, email: &str, _redirect_to: &str) -> Result<()> {
        self.take_failure()?;
        // Accepted whether or not the email is registered.
        lock(&self.inner)?.reset_requests.push(email.to_string());
        Ok(())
    }

    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
    ) -> Result<String> {
        self.take_failure()?;
        Ok(format!(
            "https://mock.example/authorize?provider={}&redirect_to={redirect_to}",
            provider.as_str()
        ))
    }

    async fn sign_out(&self) -> Result<()> {
        self.take_failure()?;
        self.feed.publish(None);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_in_rejects_unknown_credentials() {
        let mock = MockAuthProvider::new();
        mock.register_user("ana@example.com", "hunter2");

        let error = mock
            .sign_in_with_password("ana@example.com", "wrong")
            .await
            .expect_err("must reject");
        assert_eq!(error.message(), "Invalid login credentials");

        mock.sign_in_with_password("ana@example.com", "hunter2")
            .await
            .expect("must accept");
        assert!(mock.current_session().await.expect("reachable").is_some());
    }

    #[tokio::test]
    async fn reset_succeeds_for_unknown_email() {
        let mock = MockAuthProvider::new();

        mock.request_password_reset("nobody@example.com", "http://localhost:3000/#/update-password")
            .await
            .expect("must accept");

        assert_eq!(mock.reset_requests(), vec!["nobody@example.com".to_string()]);
    }

    #[tokio::test]
    async fn fail_next_applies_once() {
        let mock = MockAuthProvider::new();
        mock.register_user("ana@example.com", "hunter2");
        mock.fail_next_with("Service unavailable");

        let error = mock
            .sign_in_with_password("ana@example.com", "hunter2")
            .await
            .expect_err("injected failure");
        assert_eq!(error.message(), "Service unavailable");

        mock.sign_in_with_password("ana@example.com", "hunter2")
            .await
            .expect("failure consumed");
    }
}
