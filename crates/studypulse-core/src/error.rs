//! Error types for the StudyPulse client.
//!
//! Each area of the client has its own error enum. `StudyPulseError` wraps them
//! for callers that only need a single error type.

use thiserror::Error;

/// Minimum number of characters a password must have at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Failures of the login/register flows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The server answered `{success: false}`; carries its `detail` or a default message.
    #[error("{0}")]
    Rejected(String),

    /// The server could not be reached or did not answer in a usable way.
    #[error("server unreachable")]
    Unreachable,

    /// Password and confirmation differ.
    #[error("password confirmation does not match")]
    Mismatch,

    /// Password shorter than [`MIN_PASSWORD_LEN`].
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    TooShort,
}

/// Failures at the API client boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network-layer failure (DNS, connect, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body was not JSON or did not match the endpoint schema.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The server refused the bearer token.
    #[error("unauthorized")]
    Unauthorized,

    /// The server answered `{success: false, detail}` on a data endpoint.
    #[error("request rejected: {0}")]
    Rejected(String),
}

impl ApiError {
    /// Check if this is a transport-level failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Failures of the durable key-value storage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// A stored value could not be decoded into the expected shape.
    #[error("corrupt value for '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    /// The backing file could not be read or written.
    #[error("storage I/O error: {0}")]
    Io(String),

    /// The backing file lock could not be acquired.
    #[error("storage lock error: {0}")]
    Lock(String),
}

impl StorageError {
    pub fn corrupt(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::Corrupt {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(format!("{} (kind: {:?})", err, err.kind()))
    }
}

/// Failures while loading the client configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(String),

    #[error("config parse error: {0}")]
    Parse(String),

    /// A directory the client needs could not be determined.
    #[error("cannot resolve {0} directory")]
    DirectoryNotFound(&'static str),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// A shared error type for the entire client.
#[derive(Error, Debug, Clone)]
pub enum StudyPulseError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Template rendering error
    #[error("Render error: {0}")]
    Render(String),
}

impl StudyPulseError {
    /// Creates a Render error
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }
}

impl From<std::io::Error> for StudyPulseError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.into())
    }
}

/// A type alias for `Result<T, StudyPulseError>`.
pub type Result<T> = std::result::Result<T, StudyPulseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_short_message_mentions_minimum() {
        assert_eq!(
            AuthError::TooShort.to_string(),
            "password must be at least 6 characters"
        );
    }

    #[test]
    fn test_rejected_displays_detail() {
        let err = AuthError::Rejected("帳號或密碼錯誤".to_string());
        assert_eq!(err.to_string(), "帳號或密碼錯誤");
    }

    #[test]
    fn test_io_error_converts_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StudyPulseError = io.into();
        assert!(matches!(err, StudyPulseError::Storage(StorageError::Io(_))));
    }

    #[test]
    fn test_wrapping_keeps_category() {
        let err: StudyPulseError = ApiError::Unauthorized.into();
        assert!(matches!(err, StudyPulseError::Api(ApiError::Unauthorized)));

        let err: StudyPulseError = AuthError::TooShort.into();
        assert!(matches!(err, StudyPulseError::Auth(AuthError::TooShort)));
    }
}
