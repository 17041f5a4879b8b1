//! Durable session persistence.
//!
//! The session is mirrored to two keys of the key-value store: the raw token
//! under `authToken` and the JSON-encoded user record under `currentUser`.

use std::sync::Arc;
use studypulse_core::storage::keys;
use studypulse_core::{KeyValueStore, Session, StorageError, UserProfile};

/// Persists and restores the authenticated session.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Restores the persisted session.
    ///
    /// Never fails: unreadable or malformed records are deleted and `None` is
    /// returned. A token without a user record (or the reverse) counts as
    /// malformed.
    pub fn restore(&self) -> Option<Session> {
        match self.try_restore() {
            Ok(session) => {
                if let Some(ref s) = session {
                    tracing::info!("[SessionStore] Restored session for '{}'", s.user().username);
                }
                session
            }
            Err(e) => {
                tracing::warn!("[SessionStore] Discarding persisted session: {}", e);
                if let Err(clear_err) = self.clear() {
                    tracing::warn!(
                        "[SessionStore] Failed to clear corrupt session: {}",
                        clear_err
                    );
                }
                None
            }
        }
    }

    fn try_restore(&self) -> Result<Option<Session>, StorageError> {
        let token = self.store.get(keys::AUTH_TOKEN)?.filter(|t| !t.is_empty());
        let user = self.store.get(keys::CURRENT_USER)?.filter(|u| !u.is_empty());

        match (token, user) {
            (None, None) => Ok(None),
            (Some(token), Some(raw_user)) => {
                let user = parse_user_record(&raw_user)?;
                Ok(Some(Session::new(token, user)))
            }
            (Some(_), None) => Err(StorageError::corrupt(
                keys::CURRENT_USER,
                "token present without user record",
            )),
            (None, Some(_)) => Err(StorageError::corrupt(
                keys::AUTH_TOKEN,
                "user record present without token",
            )),
        }
    }

    /// Writes the token and user record.
    ///
    /// If the user record cannot be written the token is removed again, so the
    /// store never holds half a session. The write error is returned even when
    /// that rollback fails too.
    pub fn persist(&self, session: &Session) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(session.user())
            .map_err(|e| StorageError::corrupt(keys::CURRENT_USER, e))?;

        self.store.set(keys::AUTH_TOKEN, session.token())?;
        if let Err(e) = self.store.set(keys::CURRENT_USER, &user_json) {
            if let Err(rollback) = self.store.remove(keys::AUTH_TOKEN) {
                tracing::warn!(
                    "[SessionStore] Failed to roll back token after write error: {}",
                    rollback
                );
            }
            return Err(e);
        }

        tracing::debug!("[SessionStore] Persisted session for '{}'", session.user().username);
        Ok(())
    }

    /// Deletes both session keys. Idempotent.
    pub fn clear(&self) -> Result<(), StorageError> {
        let token_result = self.store.remove(keys::AUTH_TOKEN);
        let user_result = self.store.remove(keys::CURRENT_USER);
        token_result.and(user_result)
    }
}

/// Validates a persisted user record.
///
/// The record must be a JSON object with a non-empty string `username`.
pub fn parse_user_record(raw: &str) -> Result<UserProfile, StorageError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| StorageError::corrupt(keys::CURRENT_USER, e))?;

    let object = value
        .as_object()
        .ok_or_else(|| StorageError::corrupt(keys::CURRENT_USER, "not a JSON object"))?;

    match object.get("username").and_then(|u| u.as_str()) {
        Some(name) if !name.trim().is_empty() => {}
        _ => {
            return Err(StorageError::corrupt(
                keys::CURRENT_USER,
                "missing or empty username",
            ));
        }
    }

    serde_json::from_value(value).map_err(|e| StorageError::corrupt(keys::CURRENT_USER, e))
}
