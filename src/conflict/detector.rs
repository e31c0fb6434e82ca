//! Location/date-range conflict detection.
//!
//! Every unordered pair of projects is checked once; two projects conflict
//! when their locations are exactly equal and their closed date intervals
//! overlap. The scan is O(n²) on purpose: municipal portfolios run to tens
//! or low hundreds of projects, where a spatial or interval index would be
//! more machinery than win.

use tracing::debug;
use uuid::Uuid;

use crate::models::{Conflict, OverlapPeriod, PairKey, Project};

/// Outcome of one detection pass: the conflicts found plus any projects the
/// scan had to leave out.
#[derive(Debug, Clone, Default)]
pub struct DetectionReport {
    pub conflicts: Vec<Conflict>,
    pub excluded: Vec<ExcludedProject>,
}

impl DetectionReport {
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty() && self.excluded.is_empty()
    }

    /// Keys of all detected conflicts, in report order.
    pub fn pair_keys(&self) -> Vec<PairKey> {
        self.conflicts.iter().map(|c| c.key).collect()
    }
}

/// A project left out of the scan, with the reason it was excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludedProject {
    pub id: Uuid,
    pub title: String,
    pub reason: ExclusionReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionReason {
    /// startDate after endDate; overlap against such a range is undefined.
    MalformedDateRange,
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExclusionReason::MalformedDateRange => write!(f, "start date after end date"),
        }
    }
}

/// Runs one detection pass over the given projects.
///
/// Pure and idempotent: the same input always yields an equal report, and
/// nothing is mutated or published here. Callers diff the result against
/// their previous pass to decide which conflicts are new. Output is sorted
/// by (location, pair key) so repeated passes compare equal directly.
pub fn detect_conflicts(projects: &[Project]) -> DetectionReport {
    let mut report = DetectionReport::default();

    let mut scannable: Vec<&Project> = Vec::with_capacity(projects.len());
    for project in projects {
        if project.has_valid_range() {
            scannable.push(project);
        } else {
            debug!(
                project_id = %project.id,
                title = %project.title,
                "Excluding project with malformed date range from scan"
            );
            report.excluded.push(ExcludedProject {
                id: project.id,
                title: project.title.clone(),
                reason: ExclusionReason::MalformedDateRange,
            });
        }
    }

    for (index, project1) in scannable.iter().enumerate() {
        for project2 in scannable.iter().skip(index + 1) {
            if project1.location != project2.location {
                continue;
            }
            if let Some(overlap_period) = date_overlap(project1, project2) {
                report.conflicts.push(Conflict {
                    key: PairKey::new(project1.id, project2.id),
                    project1: (*project1).clone(),
                    project2: (*project2).clone(),
                    location: project1.location.clone(),
                    overlap_period,
                });
            }
        }
    }

    report
        .conflicts
        .sort_by(|a, b| (&a.location, a.key).cmp(&(&b.location, b.key)));

    report
}

/// Closed-interval overlap: ranges that touch on a single day still overlap,
/// and the shared period collapses to that day.
fn date_overlap(a: &Project, b: &Project) -> Option<OverlapPeriod> {
    if a.start_date <= b.end_date && b.start_date <= a.end_date {
        Some(OverlapPeriod {
            start: a.start_date.max(b.start_date),
            end: a.end_date.min(b.end_date),
        })
    } else {
        None
    }
}
