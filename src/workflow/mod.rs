//! Coordination workflows: the workspace that drives conflict detection and
//! agreements, plus the meeting and task workflows gated by the same
//! permission table.

pub mod agreements;
pub mod coordination;
pub mod meetings;
pub mod tasks;

pub use agreements::{AgreementBook, AgreementDraft, AgreementError};
pub use coordination::CoordinationWorkspace;
pub use meetings::{MeetingDraft, MeetingError, MeetingScheduler};
pub use tasks::{TaskBoard, TaskDraft, TaskError};

use crate::models::PairKey;
use crate::rbac::{can, Action, Resource, Role};

/// Errors surfaced by the gated workflow operations. Every failure is
/// returned to the immediate caller; calls are independently retryable.
#[derive(Debug)]
pub enum WorkflowError {
    PermissionDenied {
        role: Option<Role>,
        resource: Resource,
        action: Action,
    },
    UnknownConflict(PairKey),
    InvalidDraft(validator::ValidationErrors),
    Agreement(AgreementError),
    Meeting(MeetingError),
    Task(TaskError),
}

impl std::fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowError::PermissionDenied {
                role,
                resource,
                action,
            } => write!(
                f,
                "role {} may not {} on {}",
                role.map(|r| r.as_str()).unwrap_or("<none>"),
                action,
                resource
            ),
            WorkflowError::UnknownConflict(pair) => {
                write!(f, "no detected conflict for pair {}", pair)
            }
            WorkflowError::InvalidDraft(errors) => write!(f, "invalid draft: {}", errors),
            WorkflowError::Agreement(e) => write!(f, "{}", e),
            WorkflowError::Meeting(e) => write!(f, "{}", e),
            WorkflowError::Task(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for WorkflowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorkflowError::InvalidDraft(e) => Some(e),
            WorkflowError::Agreement(e) => Some(e),
            WorkflowError::Meeting(e) => Some(e),
            WorkflowError::Task(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AgreementError> for WorkflowError {
    fn from(e: AgreementError) -> Self {
        WorkflowError::Agreement(e)
    }
}

impl From<MeetingError> for WorkflowError {
    fn from(e: MeetingError) -> Self {
        WorkflowError::Meeting(e)
    }
}

impl From<TaskError> for WorkflowError {
    fn from(e: TaskError) -> Self {
        WorkflowError::Task(e)
    }
}

impl From<validator::ValidationErrors> for WorkflowError {
    fn from(e: validator::ValidationErrors) -> Self {
        WorkflowError::InvalidDraft(e)
    }
}

impl WorkflowError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, WorkflowError::PermissionDenied { .. })
    }
}

/// The single capability check every gated operation goes through.
pub(crate) fn require(
    role: Option<Role>,
    resource: Resource,
    action: Action,
) -> Result<(), WorkflowError> {
    if can(role, resource, action) {
        Ok(())
    } else {
        Err(WorkflowError::PermissionDenied {
            role,
            resource,
            action,
        })
    }
}
