//! Candidate filtering.
//!
//! The pool is a run-local working copy of the roster holding only
//! assignable reviewers, in roster order. Workload changes apply to the
//! copy; a reviewer that reaches capacity is removed by index after
//! selection, so no list is mutated while it is being scored.

use crate::models::Reviewer;

/// Returns the assignable reviewers (available and below capacity), in
/// roster order.
pub fn filter_candidates(roster: &[Reviewer]) -> Vec<Reviewer> {
    roster.iter().filter(|r| r.is_assignable()).cloned().collect()
}

/// Run-local pool of reviewers that can still take work.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    reviewers: Vec<Reviewer>,
}

impl CandidatePool {
    /// Builds the pool from a roster snapshot.
    pub fn from_roster(roster: &[Reviewer]) -> Self {
        Self {
            reviewers: filter_candidates(roster),
        }
    }

    /// Current candidates, in roster order.
    pub fn candidates(&self) -> &[Reviewer] {
        &self.reviewers
    }

    /// Number of candidates left.
    pub fn len(&self) -> usize {
        self.reviewers.len()
    }

    /// Whether no candidate is left.
    pub fn is_empty(&self) -> bool {
        self.reviewers.is_empty()
    }

    /// Finds a candidate by ID.
    pub fn get(&self, reviewer_id: &str) -> Option<&Reviewer> {
        self.reviewers.iter().find(|r| r.id == reviewer_id)
    }

    /// Records one new assignment for the candidate at `index`.
    ///
    /// Increments its workload and drops it from the pool once full.
    /// Returns the workload before the increment.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn record_assignment(&mut self, index: usize) -> u32 {
        let reviewer = &mut self.reviewers[index];
        let before = reviewer.current_workload;
        reviewer.current_workload += 1;

        if !reviewer.has_capacity() {
            let full = self.reviewers.remove(index);
            tracing::debug!(
                reviewer_id = %full.id,
                workload = full.current_workload,
                "Reviewer reached capacity, removed from candidate pool"
            );
        }
        before
    }
}
