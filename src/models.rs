//! Domain records shared across the coordination workflows.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Untrusted project record as supplied by collaborators (JSON-shaped).
///
/// Location and dates are optional here so a malformed record can be
/// rejected with a precise reason instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: Uuid,
    pub title: String,
    pub department: String,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// A validated project. Identity is immutable; status and dates change
/// through re-ingestion of an updated record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub department: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl TryFrom<ProjectRecord> for Project {
    type Error = ProjectValidationError;

    fn try_from(record: ProjectRecord) -> Result<Self, Self::Error> {
        let location = match record.location {
            Some(l) if !l.trim().is_empty() => l,
            _ => return Err(ProjectValidationError::MissingField(record.id, "location")),
        };
        let start_date = record
            .start_date
            .ok_or(ProjectValidationError::MissingField(record.id, "startDate"))?;
        let end_date = record
            .end_date
            .ok_or(ProjectValidationError::MissingField(record.id, "endDate"))?;

        Ok(Project {
            id: record.id,
            title: record.title,
            department: record.department,
            location,
            start_date,
            end_date,
        })
    }
}

impl Project {
    /// A project whose range runs backwards cannot take part in overlap
    /// computation; the detector excludes and flags it.
    pub fn has_valid_range(&self) -> bool {
        self.start_date <= self.end_date
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    MissingField(Uuid, &'static str),
}

impl std::fmt::Display for ProjectValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectValidationError::MissingField(id, field) => {
                write!(f, "project {} is missing required field {}", id, field)
            }
        }
    }
}

impl std::error::Error for ProjectValidationError {}

/// Unordered pair of project identifiers, normalized so the same two
/// projects always produce the same key regardless of scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey(Uuid, Uuid);

impl PairKey {
    pub fn new(a: Uuid, b: Uuid) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn first(&self) -> Uuid {
        self.0
    }

    pub fn second(&self) -> Uuid {
        self.1
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.0 == id || self.1 == id
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.0, self.1)
    }
}

/// The shared slice of two overlapping date ranges. Closed on both ends; a
/// single-day touch collapses start and end to that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A detected scheduling collision between two projects sharing a location.
/// Derived data: recomputed from scratch on every project-set change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub key: PairKey,
    pub project1: Project,
    pub project2: Project,
    pub location: String,
    pub overlap_period: OverlapPeriod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgreementType {
    UnifiedPhasing,
    JointExecution,
    CostSharing,
    ResourceSharing,
}

impl AgreementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgreementType::UnifiedPhasing => "unified_phasing",
            AgreementType::JointExecution => "joint_execution",
            AgreementType::CostSharing => "cost_sharing",
            AgreementType::ResourceSharing => "resource_sharing",
        }
    }
}

impl std::fmt::Display for AgreementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgreementStatus {
    Pending,
    Approved,
    Rejected,
}

impl AgreementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgreementStatus::Pending => "pending",
            AgreementStatus::Approved => "approved",
            AgreementStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, AgreementStatus::Pending)
    }
}

impl std::fmt::Display for AgreementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A record resolving a conflict between two projects. Outlives the
/// conflict that prompted it; there is no automatic retraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agreement {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: AgreementType,
    pub projects: PairKey,
    pub status: AgreementStatus,
    pub timestamp: DateTime<Utc>,
    pub document: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl MeetingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Scheduled => "scheduled",
            MeetingStatus::Completed => "completed",
            MeetingStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An interdepartmental meeting linked to the departments and projects it
/// concerns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub departments: Vec<String>,
    pub projects: Vec<Uuid>,
    pub status: MeetingStatus,
    pub attendees: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Ongoing,
    Completed,
    Blocked,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Ongoing => "ongoing",
            TaskStatus::Completed => "completed",
            TaskStatus::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A work-log line appended to a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskLogEntry {
    pub id: Uuid,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub author: String,
}

/// A department task tracked on the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub department: String,
    pub assignee: Option<String>,
    pub status: TaskStatus,
    pub logs: Vec<TaskLogEntry>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: Uuid) -> ProjectRecord {
        ProjectRecord {
            id,
            title: "Storm drain upgrade".to_string(),
            department: "Public Works".to_string(),
            location: Some("Ward 7".to_string()),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 10),
        }
    }

    #[test]
    fn test_pair_key_is_order_independent() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(PairKey::new(a, b), PairKey::new(b, a));
    }

    #[test]
    fn test_pair_key_contains() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let key = PairKey::new(a, b);
        assert!(key.contains(a));
        assert!(key.contains(b));
        assert!(!key.contains(Uuid::new_v4()));
    }

    #[test]
    fn test_project_validation_accepts_complete_record() {
        let project = Project::try_from(record(Uuid::new_v4())).unwrap();
        assert_eq!(project.location, "Ward 7");
        assert!(project.has_valid_range());
    }

    #[test]
    fn test_project_validation_rejects_missing_location() {
        let id = Uuid::new_v4();
        let mut r = record(id);
        r.location = None;
        assert_eq!(
            Project::try_from(r),
            Err(ProjectValidationError::MissingField(id, "location"))
        );

        let mut r = record(id);
        r.location = Some("   ".to_string());
        assert_eq!(
            Project::try_from(r),
            Err(ProjectValidationError::MissingField(id, "location"))
        );
    }

    #[test]
    fn test_project_validation_rejects_missing_dates() {
        let id = Uuid::new_v4();
        let mut r = record(id);
        r.start_date = None;
        assert_eq!(
            Project::try_from(r),
            Err(ProjectValidationError::MissingField(id, "startDate"))
        );

        let mut r = record(id);
        r.end_date = None;
        assert_eq!(
            Project::try_from(r),
            Err(ProjectValidationError::MissingField(id, "endDate"))
        );
    }

    #[test]
    fn test_project_serializes_with_camel_case_dates() {
        let project = Project::try_from(record(Uuid::new_v4())).unwrap();
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["startDate"], "2024-03-01");
        assert_eq!(json["endDate"], "2024-03-10");
    }

    #[test]
    fn test_agreement_type_round_trip() {
        let json = serde_json::to_value(AgreementType::UnifiedPhasing).unwrap();
        assert_eq!(json, "unified_phasing");
        let back: AgreementType = serde_json::from_value(json).unwrap();
        assert_eq!(back, AgreementType::UnifiedPhasing);
    }

    #[test]
    fn test_agreement_status_terminality() {
        assert!(!AgreementStatus::Pending.is_terminal());
        assert!(AgreementStatus::Approved.is_terminal());
        assert!(AgreementStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_agreement_serializes_type_field() {
        let agreement = Agreement {
            id: Uuid::new_v4(),
            title: "Joint trenching".to_string(),
            description: "Share the excavation window".to_string(),
            kind: AgreementType::JointExecution,
            projects: PairKey::new(Uuid::new_v4(), Uuid::new_v4()),
            status: AgreementStatus::Pending,
            timestamp: Utc::now(),
            document: None,
        };
        let json = serde_json::to_value(&agreement).unwrap();
        assert_eq!(json["type"], "joint_execution");
        assert_eq!(json["status"], "pending");
    }
}
