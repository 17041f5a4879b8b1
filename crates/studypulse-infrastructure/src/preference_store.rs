//! Persisted user preferences.

use std::sync::Arc;
use studypulse_core::storage::keys;
use studypulse_core::{KeyValueStore, Locale, StorageError};

#[derive(Clone)]
pub struct PreferenceStore {
    store: Arc<dyn KeyValueStore>,
}

impl PreferenceStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Saved interface language, or the default when unset or unreadable.
    pub fn language(&self) -> Locale {
        match self.store.get(keys::PREFERRED_LANGUAGE) {
            Ok(Some(code)) => Locale::from_code(&code),
            Ok(None) => Locale::default(),
            Err(e) => {
                tracing::warn!("[PreferenceStore] Failed to read language: {}", e);
                Locale::default()
            }
        }
    }

    pub fn set_language(&self, locale: Locale) -> Result<(), StorageError> {
        self.store.set(keys::PREFERRED_LANGUAGE, locale.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;

    #[test]
    fn test_language_defaults_to_traditional_chinese() {
        let prefs = PreferenceStore::new(Arc::new(MemoryKeyValueStore::new()));
        assert_eq!(prefs.language(), Locale::ZhTw);
    }

    #[test]
    fn test_language_is_persisted() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        PreferenceStore::new(kv.clone())
            .set_language(Locale::En)
            .unwrap();

        assert_eq!(kv.get(keys::PREFERRED_LANGUAGE).unwrap().as_deref(), Some("en"));
        assert_eq!(PreferenceStore::new(kv).language(), Locale::En);
    }
}
