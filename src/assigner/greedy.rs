//! Greedy workload-balancing assigner.
//!
//! # Algorithm
//!
//! 1. Take the first `max_resources_per_run` resources; defer the rest.
//! 2. Build the candidate pool from the roster.
//! 3. For each resource in input order, extract features, score every
//!    candidate, and assign the best one.
//! 4. Increment the chosen reviewer's workload; drop it from the pool
//!    when full.
//! 5. Once the pool is empty, skip the remaining resources.
//!
//! # Complexity
//! O(n * c * r) where n=resources, c=candidates, r=scoring rules.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;

use super::CandidatePool;
use crate::config::EngineConfig;
use crate::models::{
    Assignment, AssignmentPlan, Priority, Resource, ResourceState, Reviewer, SkipReason,
};
use crate::scoring::{FeatureExtractor, ScoreEngine};

/// Input container for one assignment run.
#[derive(Debug, Clone)]
pub struct AssignmentRequest {
    /// Pending resources, in processing order.
    pub resources: Vec<Resource>,
    /// Reviewer roster with workload snapshot.
    pub roster: Vec<Reviewer>,
    /// Reference time for urgency and due dates.
    pub now: DateTime<Utc>,
}

impl AssignmentRequest {
    /// Creates a request at the current time.
    pub fn new(resources: Vec<Resource>, roster: Vec<Reviewer>) -> Self {
        Self {
            resources,
            roster,
            now: Utc::now(),
        }
    }

    /// Sets the reference time.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}

/// Greedy reviewer assigner.
///
/// Pure and synchronous: the caller's roster is never mutated, and two runs
/// over equal inputs and reference time produce equal plans.
///
/// # Example
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use review_dispatch::assigner::GreedyAssigner;
/// use review_dispatch::config::EngineConfig;
/// use review_dispatch::models::{Resource, Reviewer, Specialty};
///
/// let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
/// let resources = vec![
///     Resource::new("R1", now - Duration::days(6))
///         .with_skill_area("speech therapy")
///         .with_evidence_level(5)
///         .with_interactive(true)
///         .with_language_count(2),
/// ];
/// let roster = vec![
///     Reviewer::new("A", Specialty::Slp).with_workload(2, 8),
///     Reviewer::new("B", Specialty::General).with_workload(1, 8),
/// ];
///
/// let plan = GreedyAssigner::new(EngineConfig::default()).assign(&resources, &roster, now);
/// assert_eq!(plan.assignment_count(), 1);
/// assert_eq!(plan.assignments[0].reviewer_id, "A");
/// assert_eq!(plan.assignments[0].score, 200);
/// ```
#[derive(Debug, Clone)]
pub struct GreedyAssigner {
    config: EngineConfig,
    engine: ScoreEngine,
    extractor: FeatureExtractor,
}

impl GreedyAssigner {
    /// Creates an assigner with the standard rules built from `config`.
    pub fn new(config: EngineConfig) -> Self {
        let engine = ScoreEngine::from_weights(&config.weights).with_tie_breaker(config.tie_breaker);
        let extractor = FeatureExtractor::new(config.urgency_age_days);
        Self {
            config,
            engine,
            extractor,
        }
    }

    /// Replaces the scoring engine.
    pub fn with_engine(mut self, engine: ScoreEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Configuration in effect.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs one assignment pass.
    pub fn assign(
        &self,
        resources: &[Resource],
        roster: &[Reviewer],
        now: DateTime<Utc>,
    ) -> AssignmentPlan {
        let mut plan = AssignmentPlan::new();
        let limit = self.config.max_resources_per_run.min(resources.len());
        let (batch, overflow) = resources.split_at(limit);

        for resource in overflow {
            plan.add_deferred(&resource.id);
        }

        let mut pool = CandidatePool::from_roster(roster);
        let mut seen: HashSet<&str> = HashSet::new();
        let due_offset = Duration::try_days(self.config.due_offset_days).unwrap_or(Duration::MAX);

        tracing::debug!(
            batch = batch.len(),
            deferred = overflow.len(),
            candidates = pool.len(),
            "Starting assignment run"
        );

        for resource in batch {
            if !seen.insert(resource.id.as_str()) {
                tracing::debug!(resource_id = %resource.id, "Duplicate resource in batch, skipping");
                plan.add_skipped(&resource.id, SkipReason::DuplicateResource);
                continue;
            }

            let features = self.extractor.extract(resource, now);
            let Some((index, score)) = self.engine.select_best(&features, pool.candidates())
            else {
                tracing::debug!(
                    resource_id = %resource.id,
                    state = ?ResourceState::Skipped,
                    "No reviewer with spare capacity"
                );
                plan.add_skipped(&resource.id, SkipReason::NoCandidates);
                continue;
            };
            tracing::trace!(
                resource_id = %resource.id,
                state = ?ResourceState::Scored,
                specialty = %features.specialty,
                urgent = features.urgent,
                complexity = ?features.complexity,
                best_score = score.total,
                "Scored candidates"
            );

            let reviewer_id = pool.candidates()[index].id.clone();
            let workload_before = pool.record_assignment(index);
            let priority = if features.urgent {
                Priority::Urgent
            } else {
                Priority::Normal
            };

            tracing::debug!(
                resource_id = %resource.id,
                reviewer_id = %reviewer_id,
                score = score.total,
                ?priority,
                "Assigned reviewer"
            );

            plan.add_assignment(Assignment {
                resource_id: resource.id.clone(),
                reviewer_id,
                assigned_at: now,
                due_at: now
                    .checked_add_signed(due_offset)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
                priority,
                reason: score.reason(),
                score: score.total,
                workload_before,
            });
        }

        let no_candidates = plan
            .skipped
            .iter()
            .filter(|s| s.reason == SkipReason::NoCandidates)
            .count();
        if no_candidates > 0 {
            tracing::warn!(
                skipped = no_candidates,
                "Resources left unassigned: reviewer capacity exhausted"
            );
        }
        tracing::info!(
            assigned = plan.assignment_count(),
            skipped = plan.skipped.len(),
            deferred = plan.deferred.len(),
            "Assignment run complete"
        );

        plan
    }

    /// Runs one assignment pass from a request.
    pub fn assign_request(&self, request: &AssignmentRequest) -> AssignmentPlan {
        self.assign(&request.resources, &request.roster, request.now)
    }
}

impl Default for GreedyAssigner {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
