//! In-process notification channel with auto-expiry.

pub mod channel;
pub mod types;

pub use channel::NotificationChannel;
pub use types::{ActionCommand, Notification, NotificationAction, NotificationDraft, NotificationKind};
