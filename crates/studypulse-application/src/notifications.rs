//! Notification center: a stack of transient, auto-expiring messages.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Mutex, MutexGuard};
use studypulse_core::{Notification, Severity};
use uuid::Uuid;

struct Entry {
    notification: Notification,
    delivered: bool,
}

/// Holds every notification until its display time runs out.
///
/// Notifications stack: each `notify` call adds a new entry, nothing is
/// merged or deduplicated.
pub struct NotificationCenter {
    display: Duration,
    entries: Mutex<Vec<Entry>>,
}

impl NotificationCenter {
    pub fn new(display: std::time::Duration) -> Self {
        let display = Duration::from_std(display).unwrap_or_else(|_| Duration::seconds(3));
        Self {
            display,
            entries: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn notify(&self, message: impl Into<String>, severity: Severity) -> Notification {
        self.notify_at(message, severity, Utc::now())
    }

    pub fn notify_at(
        &self,
        message: impl Into<String>,
        severity: Severity,
        now: DateTime<Utc>,
    ) -> Notification {
        let notification = Notification::new(message, severity, now);
        match severity {
            Severity::Error => tracing::warn!("[Notify] {}", notification.message),
            _ => tracing::info!("[Notify] {}: {}", severity, notification.message),
        }
        self.lock().push(Entry {
            notification: notification.clone(),
            delivered: false,
        });
        notification
    }

    /// Notifications still on screen at `now`, oldest first. Expired ones are dropped.
    pub fn visible_at(&self, now: DateTime<Utc>) -> Vec<Notification> {
        let mut entries = self.lock();
        entries.retain(|e| !e.notification.is_expired(now, self.display));
        entries.iter().map(|e| e.notification.clone()).collect()
    }

    pub fn visible(&self) -> Vec<Notification> {
        self.visible_at(Utc::now())
    }

    /// Notifications that have not been handed out by this method before.
    ///
    /// Front-ends that print rather than overlay use this to show each
    /// message once.
    pub fn take_undelivered(&self) -> Vec<Notification> {
        let mut entries = self.lock();
        entries
            .iter_mut()
            .filter(|e| !e.delivered)
            .map(|e| {
                e.delivered = true;
                e.notification.clone()
            })
            .collect()
    }

    /// Removes a notification before it expires.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|e| e.notification.id != id);
        entries.len() != before
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(std::time::Duration::from_secs(
            studypulse_core::notification::DEFAULT_DISPLAY_SECS,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifications_stack() {
        let center = NotificationCenter::default();
        let now = Utc::now();

        center.notify_at("登入成功！", Severity::Success, now);
        center.notify_at("登入成功！", Severity::Success, now);
        center.notify_at("網路錯誤", Severity::Error, now);

        let visible = center.visible_at(now);
        assert_eq!(visible.len(), 3);
        assert_eq!(visible[2].severity, Severity::Error);
    }

    #[test]
    fn test_notifications_expire_after_display_time() {
        let center = NotificationCenter::new(std::time::Duration::from_secs(3));
        let start = Utc::now();

        center.notify_at("first", Severity::Info, start);
        center.notify_at("second", Severity::Info, start + Duration::seconds(2));

        let visible = center.visible_at(start + Duration::seconds(4));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].message, "second");

        assert!(center.visible_at(start + Duration::seconds(6)).is_empty());
    }

    #[test]
    fn test_take_undelivered_hands_out_once() {
        let center = NotificationCenter::default();
        center.notify("a", Severity::Info);
        assert_eq!(center.take_undelivered().len(), 1);
        assert!(center.take_undelivered().is_empty());

        center.notify("b", Severity::Warning);
        let fresh = center.take_undelivered();
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].message, "b");
    }

    #[test]
    fn test_dismiss() {
        let center = NotificationCenter::default();
        let n = center.notify("bye", Severity::Info);
        assert!(center.dismiss(n.id));
        assert!(!center.dismiss(n.id));
        assert!(center.visible().is_empty());
    }
}
