//! Coordination workspace integration tests.
//!
//! These cover the full loop: loading records, detection on every change,
//! the once-per-pair notification rule, and the silent-drop behavior when a
//! conflict disappears.

mod common;

use common::{conflicting_records, date, record, record_with_id, workspace};
use concord::{NotificationKind, Role};
use uuid::Uuid;

fn warning_count(ws: &concord::CoordinationWorkspace) -> usize {
    ws.channel()
        .list()
        .iter()
        .filter(|n| n.kind == NotificationKind::Warning)
        .count()
}

// ============================================================================
// Detection on Change
// ============================================================================

#[tokio::test]
async fn loading_projects_detects_conflicts_and_notifies_once_per_pair() {
    // Arrange
    let mut ws = workspace(Some(Role::Officer));
    let (a, b) = conflicting_records();

    // Act
    let rejected = ws.load_projects(vec![a, b]);

    // Assert
    assert!(rejected.is_empty());
    assert_eq!(ws.conflicts().len(), 1);
    assert_eq!(warning_count(&ws), 1);

    let warning = &ws.channel().list()[0];
    assert!(warning.persistent);
    assert!(warning.message.contains("SiteX"));
    assert!(warning.action.is_some());
}

#[tokio::test]
async fn reloading_the_same_portfolio_does_not_renotify() {
    let mut ws = workspace(Some(Role::Officer));
    let (a, b) = conflicting_records();
    ws.load_projects(vec![a.clone(), b.clone()]);

    ws.load_projects(vec![a, b]);

    assert_eq!(ws.conflicts().len(), 1);
    assert_eq!(warning_count(&ws), 1);
}

#[tokio::test]
async fn upserting_a_project_reruns_detection() {
    let mut ws = workspace(Some(Role::Officer));
    let (a, b) = conflicting_records();
    ws.load_projects(vec![a]);
    assert!(ws.conflicts().is_empty());

    ws.upsert_project(b).unwrap();

    assert_eq!(ws.conflicts().len(), 1);
}

#[tokio::test]
async fn removing_a_project_clears_its_conflicts() {
    let mut ws = workspace(Some(Role::Officer));
    let (a, b) = conflicting_records();
    let removed_id = a.id;
    ws.load_projects(vec![a, b]);
    assert_eq!(ws.conflicts().len(), 1);

    assert!(ws.remove_project(removed_id));

    assert!(ws.conflicts().is_empty());
}

// ============================================================================
// Seen-Pair Semantics
// ============================================================================

#[tokio::test]
async fn a_disappearing_conflict_is_dropped_silently() {
    let mut ws = workspace(Some(Role::Officer));
    let (a, b) = conflicting_records();
    let a_id = a.id;
    ws.load_projects(vec![a, b.clone()]);
    let before = ws.channel().list().len();

    // Move project A out of the overlap window.
    ws.upsert_project(record_with_id(
        a_id,
        "Road resurfacing",
        "SiteX",
        date(2024, 6, 1),
        date(2024, 6, 10),
    ))
    .unwrap();

    assert!(ws.conflicts().is_empty());
    // No retraction notice: the channel is exactly as it was.
    assert_eq!(ws.channel().list().len(), before);
}

#[tokio::test]
async fn a_conflict_that_returns_after_dropping_is_announced_again() {
    let mut ws = workspace(Some(Role::Officer));
    let (a, b) = conflicting_records();
    let a_id = a.id;
    let original_a = a.clone();
    ws.load_projects(vec![a, b]);
    assert_eq!(warning_count(&ws), 1);

    // Drop the conflict, then restore the original dates.
    ws.upsert_project(record_with_id(
        a_id,
        "Road resurfacing",
        "SiteX",
        date(2024, 6, 1),
        date(2024, 6, 10),
    ))
    .unwrap();
    ws.upsert_project(original_a).unwrap();

    assert_eq!(ws.conflicts().len(), 1);
    assert_eq!(warning_count(&ws), 2);
}

#[tokio::test]
async fn three_projects_at_one_site_notify_for_each_pair() {
    let mut ws = workspace(Some(Role::Officer));
    ws.load_projects(vec![
        record("A", "SiteX", date(2024, 3, 1), date(2024, 3, 31)),
        record("B", "SiteX", date(2024, 3, 1), date(2024, 3, 31)),
        record("C", "SiteX", date(2024, 3, 1), date(2024, 3, 31)),
    ]);

    assert_eq!(ws.conflicts().len(), 3);
    assert_eq!(warning_count(&ws), 3);
}

// ============================================================================
// Invalid Records
// ============================================================================

#[tokio::test]
async fn invalid_records_are_skipped_and_reported_without_aborting_the_load() {
    let mut ws = workspace(Some(Role::Officer));
    let (a, b) = conflicting_records();
    let missing_location = concord::ProjectRecord {
        id: Uuid::new_v4(),
        title: "No site yet".to_string(),
        department: "Parks".to_string(),
        location: None,
        start_date: Some(date(2024, 3, 1)),
        end_date: Some(date(2024, 3, 10)),
    };

    let rejected = ws.load_projects(vec![missing_location, a, b]);

    assert_eq!(rejected.len(), 1);
    // The valid pair still loads and conflicts.
    assert_eq!(ws.projects().len(), 2);
    assert_eq!(ws.conflicts().len(), 1);
}

#[tokio::test]
async fn malformed_ranges_are_flagged_on_the_workspace() {
    let mut ws = workspace(Some(Role::Officer));
    let backwards = record("Backwards", "SiteX", date(2024, 3, 20), date(2024, 3, 1));
    let backwards_id = backwards.id;

    ws.load_projects(vec![backwards]);

    assert_eq!(ws.excluded().len(), 1);
    assert_eq!(ws.excluded()[0].id, backwards_id);
    assert!(ws.conflicts().is_empty());
}
