pub mod config;
pub mod error;
pub mod locale;
pub mod navigation;
pub mod notification;
pub mod serde_util;
pub mod session;
pub mod storage;

pub use error::{ApiError, AuthError, ConfigError, StorageError, StudyPulseError};
pub use locale::Locale;
pub use navigation::{NavigationState, PageId};
pub use notification::{Notification, Severity};
pub use session::{Session, SessionCell, UserProfile};
pub use storage::KeyValueStore;
