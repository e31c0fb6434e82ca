//! The coordination workspace.
//!
//! One workspace drives a single view or request flow: it owns the project
//! set, the conflicts derived from it, the agreements recorded against
//! them, and a handle to the notification channel surfacing both. The
//! session's role is fixed at construction and gates every mutating
//! operation.

use std::collections::HashSet;

use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::config::{Config, DetectorConfig};
use crate::conflict::{detect_conflicts, ExcludedProject};
use crate::models::{
    Agreement, AgreementStatus, Conflict, PairKey, Project, ProjectRecord, ProjectValidationError,
};
use crate::notify::{ActionCommand, NotificationChannel, NotificationDraft};
use crate::rbac::{Action, Resource, Role};

use super::agreements::{AgreementBook, AgreementDraft};
use super::{require, WorkflowError};

pub struct CoordinationWorkspace {
    role: Option<Role>,
    channel: NotificationChannel,
    detector: DetectorConfig,
    projects: Vec<Project>,
    conflicts: Vec<Conflict>,
    excluded: Vec<ExcludedProject>,
    seen_pairs: HashSet<PairKey>,
    agreements: AgreementBook,
}

impl CoordinationWorkspace {
    pub fn new(role: Option<Role>, channel: NotificationChannel) -> Self {
        Self::with_detector_config(role, channel, DetectorConfig::default())
    }

    pub fn with_config(role: Option<Role>, channel: NotificationChannel, config: &Config) -> Self {
        Self::with_detector_config(role, channel, config.detector.clone())
    }

    fn with_detector_config(
        role: Option<Role>,
        channel: NotificationChannel,
        detector: DetectorConfig,
    ) -> Self {
        Self {
            role,
            channel,
            detector,
            projects: Vec::new(),
            conflicts: Vec::new(),
            excluded: Vec::new(),
            seen_pairs: HashSet::new(),
            agreements: AgreementBook::new(),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn channel(&self) -> &NotificationChannel {
        &self.channel
    }

    /// Replaces the project set with the given records and re-runs
    /// detection. Records that fail validation are skipped and returned;
    /// they never abort the load.
    pub fn load_projects(&mut self, records: Vec<ProjectRecord>) -> Vec<ProjectValidationError> {
        let mut rejected = Vec::new();
        let mut projects = Vec::with_capacity(records.len());

        for record in records {
            match Project::try_from(record) {
                Ok(project) => projects.push(project),
                Err(e) => {
                    warn!(error = %e, "Skipping invalid project record");
                    rejected.push(e);
                }
            }
        }

        self.projects = projects;
        self.refresh();
        rejected
    }

    /// Adds a project or replaces the one sharing its id, then re-runs
    /// detection.
    pub fn upsert_project(&mut self, record: ProjectRecord) -> Result<(), ProjectValidationError> {
        let project = Project::try_from(record)?;
        match self.projects.iter_mut().find(|p| p.id == project.id) {
            Some(existing) => *existing = project,
            None => self.projects.push(project),
        }
        self.refresh();
        Ok(())
    }

    /// Removes a project by id and re-runs detection. Returns whether a
    /// project was actually removed.
    pub fn remove_project(&mut self, id: Uuid) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        let removed = self.projects.len() != before;
        if removed {
            self.refresh();
        }
        removed
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Conflicts from the latest detection pass.
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// Projects the latest pass excluded (malformed date ranges).
    pub fn excluded(&self) -> &[ExcludedProject] {
        &self.excluded
    }

    pub fn agreements(&self) -> &[Agreement] {
        self.agreements.list()
    }

    pub fn agreement(&self, id: Uuid) -> Option<&Agreement> {
        self.agreements.get(id)
    }

    /// Re-runs detection over the current project set and surfaces newly
    /// seen conflict pairs on the channel.
    ///
    /// The seen set is replaced wholesale each pass: a pair that stops
    /// conflicting is dropped silently (no retraction notice), and if it
    /// conflicts again later it is announced again.
    pub fn refresh(&mut self) {
        if self.projects.len() > self.detector.pairwise_warn_threshold {
            warn!(
                projects = self.projects.len(),
                threshold = self.detector.pairwise_warn_threshold,
                "Project portfolio exceeds the pairwise scan threshold"
            );
        }

        let report = detect_conflicts(&self.projects);

        for excluded in &report.excluded {
            warn!(
                project_id = %excluded.id,
                title = %excluded.title,
                reason = %excluded.reason,
                "Project excluded from conflict detection"
            );
        }

        let current: HashSet<PairKey> = report.conflicts.iter().map(|c| c.key).collect();

        for conflict in &report.conflicts {
            if self.seen_pairs.contains(&conflict.key) {
                continue;
            }
            self.channel.publish(
                NotificationDraft::warning(
                    "Project Conflict Detected",
                    format!(
                        "Location conflict between \"{}\" and \"{}\" at {}",
                        conflict.project1.title, conflict.project2.title, conflict.location
                    ),
                )
                .persistent()
                .with_action(
                    "View Details",
                    ActionCommand::ReviewConflict { pair: conflict.key },
                ),
            );
        }

        self.seen_pairs = current;
        self.conflicts = report.conflicts;
        self.excluded = report.excluded;
    }

    /// Records an agreement resolving a currently detected conflict.
    ///
    /// Requires the `coordinate` grant on projects. The agreement is
    /// independent of the conflict from here on: it is not retracted if the
    /// conflict disappears, and it does not suppress future detection.
    pub fn create_agreement(
        &mut self,
        pair: PairKey,
        draft: AgreementDraft,
    ) -> Result<Agreement, WorkflowError> {
        require(self.role, Resource::Projects, Action::Coordinate)?;
        draft.validate()?;

        if !self.conflicts.iter().any(|c| c.key == pair) {
            return Err(WorkflowError::UnknownConflict(pair));
        }

        let agreement = self.agreements.record(pair, draft);

        info!(
            agreement_id = %agreement.id,
            pair = %pair,
            kind = %agreement.kind,
            "Agreement created"
        );

        self.channel.publish(NotificationDraft::success(
            "Agreement Created",
            format!(
                "New agreement \"{}\" has been created to resolve the conflict",
                agreement.title
            ),
        ));

        Ok(agreement)
    }

    /// Resolves a pending agreement to approved or rejected. Gated by the
    /// same `coordinate` grant as creation; terminal states are one-way.
    pub fn set_agreement_status(
        &mut self,
        id: Uuid,
        status: AgreementStatus,
    ) -> Result<Agreement, WorkflowError> {
        require(self.role, Resource::Projects, Action::Coordinate)?;
        let agreement = self.agreements.set_status(id, status)?;
        info!(agreement_id = %id, status = %status, "Agreement status updated");
        Ok(agreement)
    }

    /// Admin override: moves an agreement to any status, including out of a
    /// terminal state. Requires the `manage` grant on the admin resource.
    pub fn override_agreement_status(
        &mut self,
        id: Uuid,
        status: AgreementStatus,
    ) -> Result<Agreement, WorkflowError> {
        require(self.role, Resource::Admin, Action::Manage)?;
        let agreement = self.agreements.override_status(id, status)?;
        warn!(agreement_id = %id, status = %status, "Agreement status overridden");
        Ok(agreement)
    }
}
