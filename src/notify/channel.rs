//! The notification channel.
//!
//! Producers publish drafts; the channel assigns ids and timestamps, keeps
//! entries in insertion order, and schedules a removal task for every
//! non-persistent entry. Dismissal cancels a pending removal; dismissing an
//! already-expired notification is a no-op.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use tokio::task::AbortHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use super::types::{Notification, NotificationDraft};

pub const DEFAULT_EXPIRY: Duration = Duration::from_millis(5000);

#[derive(Default)]
struct ChannelInner {
    entries: Vec<Notification>,
    timers: HashMap<Uuid, AbortHandle>,
}

/// Shared handle to one notification feed. Cloning is cheap; all clones see
/// the same entries.
#[derive(Clone)]
pub struct NotificationChannel {
    inner: Arc<Mutex<ChannelInner>>,
    expiry: Duration,
}

impl NotificationChannel {
    pub fn new() -> Self {
        Self::with_expiry(DEFAULT_EXPIRY)
    }

    pub fn with_expiry(expiry: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ChannelInner::default())),
            expiry,
        }
    }

    pub fn from_config(config: &crate::config::NotificationConfig) -> Self {
        Self::with_expiry(config.expiry())
    }

    /// Publishes a draft and returns the assigned id.
    ///
    /// Non-persistent notifications are scheduled for removal after the
    /// channel's expiry delay. Scheduling needs a Tokio runtime on the
    /// calling thread; without one the entry stays until dismissed.
    pub fn publish(&self, draft: NotificationDraft) -> Uuid {
        let id = Uuid::new_v4();
        let notification = Notification {
            id,
            kind: draft.kind,
            title: draft.title,
            message: draft.message,
            timestamp: Utc::now(),
            persistent: draft.persistent,
            action: draft.action,
        };
        let persistent = notification.persistent;

        {
            let mut inner = self.lock();
            inner.entries.push(notification);
        }

        debug!(id = %id, persistent = persistent, "Notification published");

        if !persistent {
            self.schedule_expiry(id);
        }

        id
    }

    /// Removes a notification and cancels its pending expiry, if any.
    /// Unknown ids (already expired or dismissed) are ignored.
    pub fn dismiss(&self, id: Uuid) {
        let mut inner = self.lock();
        inner.entries.retain(|n| n.id != id);
        if let Some(timer) = inner.timers.remove(&id) {
            // Aborting a task that already finished is harmless.
            timer.abort();
        }
    }

    /// Current notifications in insertion order.
    pub fn list(&self) -> Vec<Notification> {
        self.lock().entries.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Drops every entry and cancels all pending expiry tasks.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        for (_, timer) in inner.timers.drain() {
            timer.abort();
        }
    }

    fn schedule_expiry(&self, id: Uuid) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!(id = %id, "No async runtime; notification will not auto-expire");
                return;
            }
        };

        let inner = Arc::clone(&self.inner);
        let expiry = self.expiry;
        let task = handle.spawn(async move {
            tokio::time::sleep(expiry).await;
            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.entries.retain(|n| n.id != id);
            inner.timers.remove(&id);
        });

        self.lock().timers.insert(id, task.abort_handle());
    }

    fn lock(&self) -> MutexGuard<'_, ChannelInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}
