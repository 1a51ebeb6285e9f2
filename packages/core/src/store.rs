use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::identity::IdentityRecord;
use crate::state::SessionState;

/// Point-in-time view of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Bootstrapping (or an auth operation) has produced an answer
    pub resolved: bool,
    /// A bootstrap call is in flight
    pub loading: bool,
    pub identity: Option<Arc<IdentityRecord>>,
}

impl SessionSnapshot {
    pub fn state(&self) -> SessionState {
        SessionState::derive(self.resolved, self.identity.as_deref())
    }
}

/// Process-wide holder of the current identity.
///
/// A single writable cell with observers: every write replaces the whole
/// snapshot and wakes all subscribers. Clones share the same cell.
#[derive(Clone)]
pub struct SessionStore {
    cell: Arc<watch::Sender<SessionSnapshot>>,
}

impl SessionStore {
    /// Create a store in the initial `Unknown` state
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::default());
        Self { cell: Arc::new(tx) }
    }

    /// Current snapshot (cheap: the identity is behind an `Arc`)
    pub fn get(&self) -> SessionSnapshot {
        self.cell.borrow().clone()
    }

    pub fn state(&self) -> SessionState {
        self.cell.borrow().state()
    }

    pub fn identity(&self) -> Option<Arc<IdentityRecord>> {
        self.cell.borrow().identity.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.cell.borrow().loading
    }

    /// Replace the identity wholesale and mark the session resolved.
    ///
    /// A record without a usable id is stored as `None`.
    pub fn set(&self, record: Option<IdentityRecord>) {
        let identity = record.filter(IdentityRecord::has_valid_id).map(Arc::new);
        let snapshot = SessionSnapshot {
            resolved: true,
            loading: false,
            identity,
        };
        let state = snapshot.state();
        let previous = self.cell.send_replace(snapshot).state();
        if previous != state {
            info!(from = %previous, to = %state, "Session state changed");
        } else {
            debug!(state = %state, "Session identity replaced");
        }
    }

    /// Forget everything and go back to `Unknown`, re-arming the bootstrapper
    pub fn invalidate(&self) {
        self.cell.send_replace(SessionSnapshot::default());
        info!("Session invalidated");
    }

    /// Flag an in-flight bootstrap; cleared by the next `set`
    pub fn mark_loading(&self) {
        self.cell.send_modify(|snapshot| snapshot.loading = true);
    }

    /// Observe every future write
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.cell.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("snapshot", &*self.cell.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, profile_setup: bool) -> IdentityRecord {
        IdentityRecord {
            id: id.into(),
            email: "ada@example.com".into(),
            first_name: None,
            last_name: None,
            profile_setup,
            image: None,
            color: None,
        }
    }

    #[test]
    fn test_starts_unknown() {
        let store = SessionStore::new();
        assert_eq!(store.state(), SessionState::Unknown);
        assert!(store.identity().is_none());
        assert!(!store.is_loading());
    }

    #[test]
    fn test_set_complete_record() {
        let store = SessionStore::new();
        store.set(Some(record("u1", true)));

        assert_eq!(store.state(), SessionState::AuthenticatedComplete);
        assert_eq!(store.identity().unwrap().id, "u1");
    }

    #[test]
    fn test_set_none_is_anonymous() {
        let store = SessionStore::new();
        store.set(Some(record("u1", false)));
        store.set(None);

        assert_eq!(store.state(), SessionState::Anonymous);
    }

    #[test]
    fn test_empty_id_stored_as_none() {
        let store = SessionStore::new();
        store.set(Some(record("", true)));

        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(store.identity().is_none());
    }

    #[test]
    fn test_set_clears_loading() {
        let store = SessionStore::new();
        store.mark_loading();
        assert!(store.is_loading());
        assert_eq!(store.state(), SessionState::Unknown);

        store.set(None);
        assert!(!store.is_loading());
    }

    #[test]
    fn test_invalidate_returns_to_unknown() {
        let store = SessionStore::new();
        store.set(Some(record("u1", true)));
        store.invalidate();

        assert_eq!(store.get(), SessionSnapshot::default());
        assert_eq!(store.state(), SessionState::Unknown);
    }

    #[test]
    fn test_clones_share_cell() {
        let store = SessionStore::new();
        let other = store.clone();
        other.set(Some(record("u1", false)));

        assert_eq!(store.state(), SessionState::AuthenticatedIncomplete);
    }

    #[tokio::test]
    async fn test_subscribers_notified_on_set() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        store.set(Some(record("u1", true)));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().state(), SessionState::AuthenticatedComplete);
    }

    #[tokio::test]
    async fn test_subscriber_sees_latest_value() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        store.set(Some(record("u1", false)));
        store.set(Some(record("u1", true)));

        rx.changed().await.unwrap();
        assert_eq!(
            rx.borrow_and_update().state(),
            SessionState::AuthenticatedComplete
        );
        assert!(!rx.has_changed().unwrap());
    }
}
