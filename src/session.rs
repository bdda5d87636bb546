//! Per-visitor navigation sessions
//!
//! Every session owns an independent [`NavigationState`]. Sessions are keyed
//! by a random id carried in a cookie and dropped after a period of inactivity.
//! Callers take a copy of the state, work on it without holding the lock and
//! write it back with [`SessionStore::update`].

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::navigation::NavigationState;

struct Session {
    nav: NavigationState,
    last_seen: DateTime<Utc>,
}

/// In-memory session table
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Session>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a store whose sessions expire after `ttl` of inactivity
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Resolve the caller's session, creating a fresh one if `id` is unknown or expired
    ///
    /// Returns the session id and whether it was just created.
    pub fn get_or_create(&self, id: Option<Uuid>) -> (Uuid, bool) {
        self.get_or_create_at(id, Utc::now())
    }

    fn get_or_create_at(&self, id: Option<Uuid>, now: DateTime<Utc>) -> (Uuid, bool) {
        let mut sessions = self.lock();
        Self::purge(&mut sessions, now, self.ttl);

        if let Some(id) = id {
            if let Some(session) = sessions.get_mut(&id) {
                session.last_seen = now;
                return (id, false);
            }
        }

        let id = Uuid::new_v4();
        tracing::debug!("New session {}", id);
        sessions.insert(
            id,
            Session {
                nav: NavigationState::new(),
                last_seen: now,
            },
        );
        (id, true)
    }

    /// Copy of a session's navigation state; list view everywhere if it is gone
    pub fn snapshot(&self, id: Uuid) -> NavigationState {
        self.lock()
            .get(&id)
            .map(|session| session.nav.clone())
            .unwrap_or_default()
    }

    /// Store a session's navigation state
    pub fn update(&self, id: Uuid, nav: NavigationState) {
        self.update_at(id, nav, Utc::now());
    }

    fn update_at(&self, id: Uuid, nav: NavigationState, now: DateTime<Utc>) {
        self.lock().insert(id, Session { nav, last_seen: now });
    }

    /// Drop sessions idle for longer than the TTL
    ///
    /// Returns the number of sessions removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        Self::purge(&mut self.lock(), now, self.ttl)
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn purge(
        sessions: &mut HashMap<Uuid, Session>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> usize {
        let before = sessions.len();
        sessions.retain(|_, session| now - session.last_seen <= ttl);
        let purged = before - sessions.len();
        if purged > 0 {
            tracing::debug!("Purged {} idle sessions", purged);
        }
        purged
    }
}
