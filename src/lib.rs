//! Concord - inter-departmental project coordination for a municipal
//! services portal.
//!
//! The crate is the decision core behind the portal's coordination views:
//! a static role/permission table, pairwise location/date conflict
//! detection over the project portfolio, an agreement workflow resolving
//! detected conflicts, and a notification channel surfacing both. HTTP,
//! persistence, and rendering live in the embedding services; they hand in
//! project records and the session's role, and get serializable value
//! objects back.

pub mod config;
pub mod conflict;
pub mod models;
pub mod notify;
pub mod rbac;
pub mod telemetry;
pub mod workflow;

pub use config::Config;
pub use conflict::{detect_conflicts, DetectionReport};
pub use models::{
    Agreement, AgreementStatus, AgreementType, Conflict, Meeting, MeetingStatus, OverlapPeriod,
    PairKey, Project, ProjectRecord, Task, TaskStatus,
};
pub use notify::{Notification, NotificationChannel, NotificationDraft, NotificationKind};
pub use rbac::{can, display_name, Action, Resource, Role};
pub use telemetry::init_tracing;
pub use workflow::{
    AgreementDraft, CoordinationWorkspace, MeetingDraft, MeetingScheduler, TaskBoard, TaskDraft,
    WorkflowError,
};
