//! Session domain: the authenticated identity and its shared in-memory cell.

mod model;

pub use model::{Session, UserProfile};

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-wide handle to the current session.
///
/// Cloning the cell shares the same underlying slot, so the API client sees
/// a login performed by the auth controller without any extra wiring.
#[derive(Debug, Clone, Default)]
pub struct SessionCell {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionCell {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns a copy of the active session, if any.
    pub fn current(&self) -> Option<Session> {
        self.read().clone()
    }

    /// Returns the bearer token of the active session, if any.
    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.token().to_string())
    }

    pub fn is_active(&self) -> bool {
        self.read().is_some()
    }

    /// Installs a new session, replacing any previous one.
    pub fn replace(&self, session: Session) {
        *self.write() = Some(session);
    }

    /// Applies `f` to the active session's user. Returns the updated session.
    pub fn update_user<F>(&self, f: F) -> Option<Session>
    where
        F: FnOnce(&mut UserProfile),
    {
        let mut guard = self.write();
        let session = guard.as_mut()?;
        f(session.user_mut());
        Some(session.clone())
    }

    /// Drops the active session.
    pub fn clear(&self) {
        *self.write() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let cell = SessionCell::new();
        let other = cell.clone();

        cell.replace(Session::new("tok", UserProfile::new("1", "alice")));
        assert_eq!(other.token().as_deref(), Some("tok"));

        other.clear();
        assert!(!cell.is_active());
    }

    #[test]
    fn test_update_user_without_session_is_none() {
        let cell = SessionCell::new();
        assert!(cell.update_user(|u| u.is_admin = true).is_none());
    }

    #[test]
    fn test_update_user_changes_shared_session() {
        let cell = SessionCell::new();
        cell.replace(Session::new("tok", UserProfile::new("1", "alice")));

        let updated = cell
            .update_user(|u| u.display_name = Some("Alice".to_string()))
            .unwrap();

        assert_eq!(updated.user().shown_name(), "Alice");
        assert_eq!(cell.current().unwrap().user().shown_name(), "Alice");
    }
}
