//! Transient user-facing notifications.

use chrono::{DateTime, Duration, Utc};
use strum::{Display, EnumString};
use uuid::Uuid;

/// How long a notification stays visible unless configured otherwise.
pub const DEFAULT_DISPLAY_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Icon name shown next to the message.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Error => "exclamation-circle",
            Self::Warning => "exclamation-triangle",
            Self::Info => "info-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            created_at,
        }
    }

    pub fn expires_at(&self, display: Duration) -> DateTime<Utc> {
        self.created_at + display
    }

    pub fn is_expired(&self, now: DateTime<Utc>, display: Duration) -> bool {
        now >= self.expires_at(display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_severity_parses_lowercase() {
        assert_eq!(Severity::from_str("warning").unwrap(), Severity::Warning);
        assert_eq!(Severity::Error.to_string(), "error");
        assert!(Severity::from_str("fatal").is_err());
    }

    #[test]
    fn test_expiry_boundary() {
        let created = Utc::now();
        let n = Notification::new("hi", Severity::Info, created);
        let display = Duration::seconds(3);

        assert!(!n.is_expired(created + Duration::milliseconds(2999), display));
        assert!(n.is_expired(created + Duration::seconds(3), display));
    }
}
