//! Notification channel integration tests.
//!
//! Expiry timing runs against Tokio's paused clock, so these are exact
//! rather than sleep-and-hope.

use std::time::Duration;

use concord::{NotificationChannel, NotificationDraft, NotificationKind};

const PAST_EXPIRY: Duration = Duration::from_millis(5100);

// ============================================================================
// Expiry
// ============================================================================

#[tokio::test(start_paused = true)]
async fn non_persistent_notification_expires_after_the_delay() {
    // Arrange
    let channel = NotificationChannel::new();
    let id = channel.publish(NotificationDraft::info("Heads up", "Transient message"));
    assert_eq!(channel.len(), 1);

    // Act
    tokio::time::sleep(PAST_EXPIRY).await;

    // Assert
    assert!(channel.list().iter().all(|n| n.id != id));
    assert!(channel.is_empty());
}

#[tokio::test(start_paused = true)]
async fn persistent_notification_survives_the_delay() {
    let channel = NotificationChannel::new();
    let id = channel.publish(
        NotificationDraft::warning("Conflict", "Needs coordination").persistent(),
    );

    tokio::time::sleep(PAST_EXPIRY).await;

    let entries = channel.list();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, id);
}

#[tokio::test(start_paused = true)]
async fn notification_survives_until_just_before_expiry() {
    let channel = NotificationChannel::new();
    channel.publish(NotificationDraft::info("Almost", "Still here"));

    tokio::time::sleep(Duration::from_millis(4900)).await;

    assert_eq!(channel.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn custom_expiry_delay_is_honored() {
    let channel = NotificationChannel::with_expiry(Duration::from_millis(100));
    channel.publish(NotificationDraft::info("Quick", "Gone soon"));

    tokio::time::sleep(Duration::from_millis(150)).await;

    assert!(channel.is_empty());
}

// ============================================================================
// Dismissal
// ============================================================================

#[tokio::test(start_paused = true)]
async fn dismissal_before_expiry_cancels_the_timer() {
    let channel = NotificationChannel::new();
    let id = channel.publish(NotificationDraft::info("Dismiss me", "Soon"));

    channel.dismiss(id);
    tokio::time::sleep(PAST_EXPIRY).await;

    assert!(channel.is_empty());
}

#[tokio::test(start_paused = true)]
async fn dismissal_after_expiry_is_a_harmless_noop() {
    let channel = NotificationChannel::new();
    let id = channel.publish(NotificationDraft::info("Already gone", "Expired"));

    tokio::time::sleep(PAST_EXPIRY).await;
    channel.dismiss(id);

    assert!(channel.is_empty());
}

#[tokio::test(start_paused = true)]
async fn dismissing_one_entry_leaves_the_rest() {
    let channel = NotificationChannel::new();
    let keep = channel.publish(NotificationDraft::info("keep", "a").persistent());
    let drop = channel.publish(NotificationDraft::info("drop", "b").persistent());

    channel.dismiss(drop);

    let ids: Vec<_> = channel.list().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![keep]);
}

// ============================================================================
// Ordering and Content
// ============================================================================

#[tokio::test]
async fn list_returns_insertion_order() {
    let channel = NotificationChannel::new();
    channel.publish(NotificationDraft::info("first", "1").persistent());
    channel.publish(NotificationDraft::warning("second", "2").persistent());
    channel.publish(NotificationDraft::success("third", "3").persistent());

    let kinds: Vec<NotificationKind> = channel.list().iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NotificationKind::Info,
            NotificationKind::Warning,
            NotificationKind::Success
        ]
    );
}

#[tokio::test]
async fn published_notifications_carry_assigned_metadata() {
    let channel = NotificationChannel::new();
    let before = chrono::Utc::now();
    let id = channel.publish(NotificationDraft::error("Failed", "Something broke").persistent());

    let entries = channel.list();
    assert_eq!(entries[0].id, id);
    assert_eq!(entries[0].kind, NotificationKind::Error);
    assert!(entries[0].timestamp >= before);
}
