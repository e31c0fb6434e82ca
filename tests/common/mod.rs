//! Common test utilities and helpers for integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use uuid::Uuid;

use concord::models::{AgreementType, Project, ProjectRecord};
use concord::workflow::AgreementDraft;
use concord::{CoordinationWorkspace, NotificationChannel, Role};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// A complete project record at the given location and date range.
pub fn record(title: &str, location: &str, start: NaiveDate, end: NaiveDate) -> ProjectRecord {
    record_with_id(Uuid::new_v4(), title, location, start, end)
}

pub fn record_with_id(
    id: Uuid,
    title: &str,
    location: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> ProjectRecord {
    ProjectRecord {
        id,
        title: title.to_string(),
        department: "Public Works".to_string(),
        location: Some(location.to_string()),
        start_date: Some(start),
        end_date: Some(end),
    }
}

/// A validated project, for driving the detector directly.
pub fn project(title: &str, location: &str, start: NaiveDate, end: NaiveDate) -> Project {
    Project::try_from(record(title, location, start, end)).expect("valid test project")
}

/// The canonical overlapping pair: both at SiteX, overlapping from
/// 2024-03-05 through 2024-03-10.
pub fn conflicting_records() -> (ProjectRecord, ProjectRecord) {
    (
        record(
            "Road resurfacing",
            "SiteX",
            date(2024, 3, 1),
            date(2024, 3, 10),
        ),
        record(
            "Water main replacement",
            "SiteX",
            date(2024, 3, 5),
            date(2024, 3, 15),
        ),
    )
}

pub fn agreement_draft() -> AgreementDraft {
    AgreementDraft {
        title: "Unified phasing for SiteX".to_string(),
        description: "Resurfacing waits for the water main crew to finish".to_string(),
        kind: AgreementType::UnifiedPhasing,
        document: None,
    }
}

/// A workspace with its own channel for the given session role.
pub fn workspace(role: Option<Role>) -> CoordinationWorkspace {
    CoordinationWorkspace::new(role, NotificationChannel::new())
}

/// A workspace pre-loaded with the canonical conflicting pair.
pub fn workspace_with_conflict(role: Option<Role>) -> CoordinationWorkspace {
    let mut ws = workspace(role);
    let (a, b) = conflicting_records();
    let rejected = ws.load_projects(vec![a, b]);
    assert!(rejected.is_empty());
    ws
}
