//! Session change feed.
//!
//! The provider owns the session; everything else observes it through this
//! feed. It is a versioned single-value store: publishing replaces the value
//! and bumps the version, and subscribers always converge on the latest
//! snapshot even if they miss intermediate ones.

use crate::state::Session;
use tokio::sync::watch;

/// A versioned view of the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// Monotonic publish counter, starting at 0 for the initial empty state.
    pub version: u64,

    /// The session at this version, `None` when signed out.
    pub session: Option<Session>,
}

/// Single-value store broadcasting session changes.
///
/// Cheap to clone handles are obtained through [`SessionFeed::subscribe`];
/// dropping a [`SessionChanges`] unsubscribes it.
#[derive(Debug)]
pub struct SessionFeed {
    tx: watch::Sender<SessionSnapshot>,
}

impl SessionFeed {
    /// Create a feed with no session.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot {
            version: 0,
            session: None,
        });
        Self { tx }
    }

    /// Publish a new session value, replacing the current one wholesale.
    pub fn publish(&self, session: Option<Session>) {
        self.tx.send_modify(|snapshot| {
            snapshot.version += 1;
            snapshot.session = session;
        });
    }

    /// The latest snapshot.
    #[must_use]
    pub fn current(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    /// Subscribe to future session changes.
    #[must_use]
    pub fn subscribe(&self) -> SessionChanges {
        SessionChanges {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for SessionFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// A subscription to session changes.
#[derive(Debug)]
pub struct SessionChanges {
    rx: watch::Receiver<SessionSnapshot>,
}

impl SessionChanges {
    /// Wait for the next change and return its snapshot.
    ///
    /// Intermediate snapshots may be skipped; the returned one is always the
    /// latest. Returns `None` once the feed is dropped.
    pub async fn next(&mut self) -> Option<SessionSnapshot> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// The latest snapshot without waiting.
    #[must_use]
    pub fn current(&self) -> SessionSnapshot {
        self.rx.borrow().clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::state::{Session, UserId, UserProfile};
    use chrono::Utc;

    fn session(email: &str) -> Session {
        Session {
            access_token: "token".to_string(),
            token_type: "bearer".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: Utc::now() + chrono::Duration::hours(1),
            user: UserProfile {
                id: UserId::new(),
                email: email.to_string(),
            },
        }
    }

    #[tokio::test]
    async fn publish_bumps_version_and_replaces_session() {
        let feed = SessionFeed::new();
        assert_eq!(feed.current().version, 0);
        assert!(feed.current().session.is_none());

        feed.publish(Some(session("ana@example.com")));
        let snapshot = feed.current();
        assert_eq!(snapshot.version, 1);
        assert!(snapshot.session.is_some());

        feed.publish(None);
        let snapshot = feed.current();
        assert_eq!(snapshot.version, 2);
        assert!(snapshot.session.is_none());
    }

    #[tokio::test]
    async fn subscriber_receives_latest_snapshot() {
        let feed = SessionFeed::new();
        let mut changes = feed.subscribe();

        feed.publish(Some(session("ana@example.com")));
        feed.publish(None);

        // A slow subscriber converges on the latest value.
        let snapshot = changes.next().await.expect("feed alive");
        assert_eq!(snapshot.version, 2);
        assert!(snapshot.session.is_none());
    }

    #[tokio::test]
    async fn next_returns_none_after_feed_dropped() {
        let feed = SessionFeed::new();
        let mut changes = feed.subscribe();
        drop(feed);

        assert!(changes.next().await.is_none());
    }
}
