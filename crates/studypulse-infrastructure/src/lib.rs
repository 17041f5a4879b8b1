pub mod config_service;
pub mod paths;
pub mod preference_store;
pub mod session_store;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::preference_store::PreferenceStore;
pub use crate::session_store::SessionStore;
pub use crate::storage::{FileKeyValueStore, MemoryKeyValueStore};
