//! Transient notifications
//!
//! A timed queue of user-facing messages. Pushing a notification with a
//! duration schedules its dismissal on the async runtime; the UI reads
//! `active()` each frame and renders whatever is still queued.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// How long a notification stays up when no duration is given
pub const DEFAULT_DURATION: Duration = Duration::from_secs(5);

/// Visual category of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

/// A queued notification
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
}

#[derive(Default)]
struct NotifyInner {
    notifications: Mutex<Vec<Notification>>,
    next_id: AtomicU64,
}

impl NotifyInner {
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Shared notification queue
#[derive(Clone, Default)]
pub struct NotificationStore {
    inner: Arc<NotifyInner>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notification. With a duration, dismissal is scheduled on the
    /// current tokio runtime; without one (or outside a runtime) the
    /// notification stays until dismissed explicitly.
    pub fn push(
        &self,
        message: impl Into<String>,
        kind: NotificationKind,
        duration: Option<Duration>,
    ) -> u64 {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.inner.lock().push(Notification {
            id,
            message: message.into(),
            kind,
        });
        if let Some(duration) = duration {
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                let inner = self.inner.clone();
                handle.spawn(async move {
                    tokio::time::sleep(duration).await;
                    inner.lock().retain(|n| n.id != id);
                });
            }
        }
        id
    }

    /// Queue an informational notification with the default duration
    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.push(message, NotificationKind::Info, Some(DEFAULT_DURATION))
    }

    /// Queue a success notification with the default duration
    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.push(message, NotificationKind::Success, Some(DEFAULT_DURATION))
    }

    /// Queue an error notification with the default duration
    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.push(message, NotificationKind::Error, Some(DEFAULT_DURATION))
    }

    /// Dismiss by id. Dismissing an unknown id is a no-op.
    pub fn dismiss(&self, id: u64) {
        self.inner.lock().retain(|n| n.id != id);
    }

    /// Drop everything in the queue
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Currently queued notifications, oldest first
    pub fn active(&self) -> Vec<Notification> {
        self.inner.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_active() {
        let store = NotificationStore::new();
        store.push("event created", NotificationKind::Success, None);
        store.push("something failed", NotificationKind::Error, None);
        let active = store.active();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].message, "event created");
        assert_eq!(active[1].kind, NotificationKind::Error);
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let store = NotificationStore::new();
        let a = store.push("a", NotificationKind::Info, None);
        let b = store.push("b", NotificationKind::Info, None);
        assert!(b > a);
    }

    #[test]
    fn test_dismiss() {
        let store = NotificationStore::new();
        let id = store.push("bye", NotificationKind::Info, None);
        store.dismiss(id);
        assert!(store.active().is_empty());
        // unknown id is a no-op
        store.dismiss(id);
    }

    #[test]
    fn test_clear() {
        let store = NotificationStore::new();
        store.push("a", NotificationKind::Info, None);
        store.push("b", NotificationKind::Info, None);
        store.clear();
        assert!(store.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_dismissal() {
        let store = NotificationStore::new();
        store.push("gone soon", NotificationKind::Info, Some(Duration::from_secs(5)));
        assert_eq!(store.active().len(), 1);

        tokio::time::sleep(Duration::from_secs(6)).await;
        tokio::task::yield_now().await;
        assert!(store.active().is_empty());
    }
}
