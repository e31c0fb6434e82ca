//! The agreement book and its status state machine.
//!
//! Agreements move pending → approved | rejected exactly once. Leaving a
//! terminal state again requires the explicit admin override; ordinary
//! re-opening means creating a new agreement.

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Agreement, AgreementStatus, AgreementType, PairKey};

/// User-supplied fields for a new agreement.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AgreementDraft {
    #[validate(length(min = 3, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: AgreementType,
    pub document: Option<String>,
}

/// Creation-ordered store of agreements. Permission checks live in the
/// workspace; the book only enforces the status machine.
#[derive(Debug, Default)]
pub struct AgreementBook {
    entries: Vec<Agreement>,
}

impl AgreementBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new pending agreement for the given project pair.
    pub fn record(&mut self, pair: PairKey, draft: AgreementDraft) -> Agreement {
        let agreement = Agreement {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            kind: draft.kind,
            projects: pair,
            status: AgreementStatus::Pending,
            timestamp: Utc::now(),
            document: draft.document,
        };
        self.entries.push(agreement.clone());
        agreement
    }

    /// Resolves a pending agreement. The target must be a terminal status;
    /// an agreement that is already resolved stays resolved.
    pub fn set_status(
        &mut self,
        id: Uuid,
        status: AgreementStatus,
    ) -> Result<Agreement, AgreementError> {
        if !status.is_terminal() {
            return Err(AgreementError::InvalidTarget(status));
        }

        let entry = self.entry_mut(id)?;
        if entry.status.is_terminal() {
            return Err(AgreementError::AlreadyResolved {
                id,
                status: entry.status,
            });
        }

        entry.status = status;
        Ok(entry.clone())
    }

    /// Admin override: moves an agreement to any status, including out of a
    /// terminal state. The caller is responsible for gating this.
    pub fn override_status(
        &mut self,
        id: Uuid,
        status: AgreementStatus,
    ) -> Result<Agreement, AgreementError> {
        let entry = self.entry_mut(id)?;
        entry.status = status;
        Ok(entry.clone())
    }

    pub fn get(&self, id: Uuid) -> Option<&Agreement> {
        self.entries.iter().find(|a| a.id == id)
    }

    /// Agreements in creation order.
    pub fn list(&self) -> &[Agreement] {
        &self.entries
    }

    /// Agreements recorded for a given project pair, oldest first.
    pub fn for_pair(&self, pair: PairKey) -> Vec<&Agreement> {
        self.entries.iter().filter(|a| a.projects == pair).collect()
    }

    fn entry_mut(&mut self, id: Uuid) -> Result<&mut Agreement, AgreementError> {
        self.entries
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(AgreementError::UnknownAgreement(id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgreementError {
    UnknownAgreement(Uuid),
    AlreadyResolved { id: Uuid, status: AgreementStatus },
    InvalidTarget(AgreementStatus),
}

impl std::fmt::Display for AgreementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgreementError::UnknownAgreement(id) => write!(f, "no agreement with id {}", id),
            AgreementError::AlreadyResolved { id, status } => {
                write!(f, "agreement {} is already {}", id, status)
            }
            AgreementError::InvalidTarget(status) => {
                write!(f, "{} is not a valid resolution status", status)
            }
        }
    }
}

impl std::error::Error for AgreementError {}
