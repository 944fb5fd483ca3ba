//! Assignment service over injected collaborators.
//!
//! Wires one run end to end: load the pending batch and the roster, run the
//! greedy assigner, append each assignment to the store, and notify the
//! chosen reviewers. The engine stays pure; all I/O lives behind the
//! traits in this module.
//!
//! # Failure model
//! - Loading failures abort the run with [`Error::Source`].
//! - The first failed append aborts with [`Error::Persist`]; assignments
//!   appended before it stay stored (each append is atomic on its own).
//! - Notification failures are logged and do not abort the run.

use chrono::{DateTime, Utc};
use thiserror::Error as ThisError;

use crate::assigner::{GreedyAssigner, RunStats};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::models::{Assignment, AssignmentPlan, Resource, Reviewer};
use crate::validation::validate_input;

/// Failure reported by a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("{0}")]
pub struct CollaboratorError(pub String);

impl CollaboratorError {
    /// Creates an error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Supplies the reviewer roster with a current workload snapshot.
pub trait RosterProvider {
    /// Loads the current roster.
    fn load_roster(&self) -> std::result::Result<Vec<Reviewer>, CollaboratorError>;
}

/// Supplies pending resources, oldest first, at most `limit` of them.
pub trait PendingResourceSource {
    /// Loads up to `limit` pending resources.
    fn pending_resources(
        &self,
        limit: usize,
    ) -> std::result::Result<Vec<Resource>, CollaboratorError>;
}

/// Durable sink for assignments. Each append is atomic.
pub trait AssignmentStore {
    /// Appends one assignment.
    fn append(&mut self, assignment: &Assignment) -> std::result::Result<(), CollaboratorError>;
}

/// Tells a reviewer about a new assignment.
pub trait ReviewerNotifier {
    /// Notifies `reviewer` of `assignment`.
    fn notify(
        &self,
        assignment: &Assignment,
        reviewer: &Reviewer,
    ) -> std::result::Result<(), CollaboratorError>;
}

/// Fixed roster.
#[derive(Debug, Clone, Default)]
pub struct StaticRoster {
    reviewers: Vec<Reviewer>,
}

impl StaticRoster {
    /// Creates a roster provider over `reviewers`.
    pub fn new(reviewers: Vec<Reviewer>) -> Self {
        Self { reviewers }
    }
}

impl RosterProvider for StaticRoster {
    fn load_roster(&self) -> std::result::Result<Vec<Reviewer>, CollaboratorError> {
        Ok(self.reviewers.clone())
    }
}

/// Pending resources held in memory, in queue order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResourceSource {
    resources: Vec<Resource>,
}

impl InMemoryResourceSource {
    /// Creates a source over `resources`, in queue order.
    pub fn new(resources: Vec<Resource>) -> Self {
        Self { resources }
    }
}

impl PendingResourceSource for InMemoryResourceSource {
    fn pending_resources(
        &self,
        limit: usize,
    ) -> std::result::Result<Vec<Resource>, CollaboratorError> {
        Ok(self.resources.iter().take(limit).cloned().collect())
    }
}

/// Assignment store backed by a `Vec`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssignmentStore {
    assignments: Vec<Assignment>,
}

impl InMemoryAssignmentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored assignments, in append order.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }
}

impl AssignmentStore for InMemoryAssignmentStore {
    fn append(&mut self, assignment: &Assignment) -> std::result::Result<(), CollaboratorError> {
        self.assignments.push(assignment.clone());
        Ok(())
    }
}

/// Outcome of one service run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The assignment plan.
    pub plan: AssignmentPlan,
    /// Run metrics.
    pub stats: RunStats,
    /// Assignments appended to the store.
    pub persisted: usize,
    /// Reviewers successfully notified.
    pub notified: usize,
}

/// Runs assignment passes against injected collaborators.
pub struct AssignmentService<R, P, S> {
    assigner: GreedyAssigner,
    roster: R,
    pending: P,
    store: S,
    notifier: Option<Box<dyn ReviewerNotifier + Send + Sync>>,
}

impl<R, P, S> AssignmentService<R, P, S>
where
    R: RosterProvider,
    P: PendingResourceSource,
    S: AssignmentStore,
{
    /// Creates a service without a notifier.
    pub fn new(config: EngineConfig, roster: R, pending: P, store: S) -> Self {
        Self {
            assigner: GreedyAssigner::new(config),
            roster,
            pending,
            store,
            notifier: None,
        }
    }

    /// Sets the reviewer notifier.
    pub fn with_notifier<N>(mut self, notifier: N) -> Self
    where
        N: ReviewerNotifier + Send + Sync + 'static,
    {
        self.notifier = Some(Box::new(notifier));
        self
    }

    /// The assignment store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs one assignment pass at reference time `now`.
    pub fn run(&mut self, now: DateTime<Utc>) -> Result<RunReport> {
        let limit = self.assigner.config().max_resources_per_run;
        let resources = self
            .pending
            .pending_resources(limit)
            .map_err(|e| Error::source("pending resources", e.0))?;
        let roster = self
            .roster
            .load_roster()
            .map_err(|e| Error::source("reviewer roster", e.0))?;

        if let Err(errors) = validate_input(&resources, &roster) {
            for e in &errors {
                tracing::warn!(kind = ?e.kind, "{}", e.message);
            }
        }

        let plan = self.assigner.assign(&resources, &roster, now);

        let mut persisted = 0usize;
        let mut notified = 0usize;
        for assignment in &plan.assignments {
            self.store
                .append(assignment)
                .map_err(|e| Error::Persist {
                    resource_id: assignment.resource_id.clone(),
                    persisted,
                    message: e.0,
                })?;
            persisted += 1;

            if let Some(notifier) = &self.notifier {
                let Some(reviewer) = roster.iter().find(|r| r.id == assignment.reviewer_id) else {
                    continue;
                };
                match notifier.notify(assignment, reviewer) {
                    Ok(()) => notified += 1,
                    Err(err) => tracing::warn!(
                        reviewer_id = %reviewer.id,
                        resource_id = %assignment.resource_id,
                        error = %err,
                        "Reviewer notification failed"
                    ),
                }
            }
        }

        let stats = RunStats::calculate(&plan, &resources, &roster);
        tracing::info!(
            persisted,
            notified,
            skipped = stats.skipped,
            avg_score = stats.avg_score,
            "Assignment service run finished"
        );

        Ok(RunReport {
            plan,
            stats,
            persisted,
            notified,
        })
    }
}
