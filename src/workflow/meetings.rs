//! Interdepartmental meeting scheduling.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Meeting, MeetingStatus};
use crate::rbac::{Action, Resource, Role};

use super::{require, WorkflowError};

/// User-supplied fields for a new meeting.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MeetingDraft {
    #[validate(length(min = 3, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: String,
    pub date: DateTime<Utc>,
    pub departments: Vec<String>,
    pub projects: Vec<Uuid>,
}

/// Creation-ordered meeting list for one session's view.
pub struct MeetingScheduler {
    role: Option<Role>,
    meetings: Vec<Meeting>,
}

impl MeetingScheduler {
    pub fn new(role: Option<Role>) -> Self {
        Self {
            role,
            meetings: Vec::new(),
        }
    }

    /// Schedules a meeting. Requires the `create` grant on meetings.
    pub fn schedule(&mut self, draft: MeetingDraft) -> Result<Meeting, WorkflowError> {
        require(self.role, Resource::Meetings, Action::Create)?;
        draft.validate()?;

        let meeting = Meeting {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            date: draft.date,
            departments: draft.departments,
            projects: draft.projects,
            status: MeetingStatus::Scheduled,
            attendees: Vec::new(),
            created_at: Utc::now(),
        };
        info!(meeting_id = %meeting.id, date = %meeting.date, "Meeting scheduled");
        self.meetings.push(meeting.clone());
        Ok(meeting)
    }

    /// Adds an attendee to a meeting that is still scheduled. Requires the
    /// `edit` grant on meetings.
    pub fn add_attendee(
        &mut self,
        id: Uuid,
        attendee: impl Into<String>,
    ) -> Result<(), WorkflowError> {
        require(self.role, Resource::Meetings, Action::Edit)?;
        let meeting = Self::open_entry(&mut self.meetings, id)?;
        meeting.attendees.push(attendee.into());
        Ok(())
    }

    /// Marks a scheduled meeting completed. Requires the `edit` grant.
    pub fn complete(&mut self, id: Uuid) -> Result<Meeting, WorkflowError> {
        self.close(id, MeetingStatus::Completed)
    }

    /// Cancels a scheduled meeting. Requires the `edit` grant.
    pub fn cancel(&mut self, id: Uuid) -> Result<Meeting, WorkflowError> {
        self.close(id, MeetingStatus::Cancelled)
    }

    pub fn meetings(&self) -> &[Meeting] {
        &self.meetings
    }

    /// Scheduled meetings at or after the given instant, soonest first.
    pub fn upcoming(&self, after: DateTime<Utc>) -> Vec<&Meeting> {
        let mut upcoming: Vec<&Meeting> = self
            .meetings
            .iter()
            .filter(|m| m.status == MeetingStatus::Scheduled && m.date >= after)
            .collect();
        upcoming.sort_by_key(|m| m.date);
        upcoming
    }

    fn close(&mut self, id: Uuid, status: MeetingStatus) -> Result<Meeting, WorkflowError> {
        require(self.role, Resource::Meetings, Action::Edit)?;
        let meeting = Self::open_entry(&mut self.meetings, id)?;
        meeting.status = status;
        info!(meeting_id = %id, status = %status, "Meeting closed");
        Ok(meeting.clone())
    }

    fn open_entry(meetings: &mut [Meeting], id: Uuid) -> Result<&mut Meeting, MeetingError> {
        let meeting = meetings
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(MeetingError::UnknownMeeting(id))?;
        if meeting.status != MeetingStatus::Scheduled {
            return Err(MeetingError::AlreadyClosed {
                id,
                status: meeting.status,
            });
        }
        Ok(meeting)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetingError {
    UnknownMeeting(Uuid),
    AlreadyClosed { id: Uuid, status: MeetingStatus },
}

impl std::fmt::Display for MeetingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeetingError::UnknownMeeting(id) => write!(f, "no meeting with id {}", id),
            MeetingError::AlreadyClosed { id, status } => {
                write!(f, "meeting {} is already {}", id, status)
            }
        }
    }
}

impl std::error::Error for MeetingError {}
