//! Assignment plan (run result) model.
//!
//! A plan is the output of one assignment run: the emitted assignments in
//! resource order, the resources that could not be placed, and the
//! resources left for a later run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Review priority carried on an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    /// Regular turnaround.
    #[default]
    Normal,
    /// Expedited review.
    Urgent,
}

/// A resource-reviewer assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Reviewed resource ID.
    pub resource_id: String,
    /// Assigned reviewer ID.
    pub reviewer_id: String,
    /// When the assignment was made.
    pub assigned_at: DateTime<Utc>,
    /// When the review is due.
    pub due_at: DateTime<Utc>,
    /// Review priority.
    pub priority: Priority,
    /// Human-readable audit trail of the score.
    pub reason: String,
    /// Match score of the chosen pair (higher = better).
    pub score: i64,
    /// Reviewer workload just before this assignment.
    pub workload_before: u32,
}

/// Why a resource received no assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// No reviewer had spare capacity.
    NoCandidates,
    /// The resource ID already appeared earlier in the batch.
    DuplicateResource,
}

/// A resource that was processed but not assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedResource {
    /// Resource ID.
    pub resource_id: String,
    /// Why no assignment was made.
    pub reason: SkipReason,
}

/// Per-resource lifecycle within a run.
///
/// `Unassigned → Scored → Assigned`, or `Unassigned → Skipped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceState {
    /// Not yet processed (or deferred past the per-run limit).
    Unassigned,
    /// Candidates have been scored; selection pending.
    Scored,
    /// Assignment emitted.
    Assigned,
    /// Terminal: no assignment this run.
    Skipped,
}

/// The result of one assignment run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentPlan {
    /// Assignments in resource input order.
    pub assignments: Vec<Assignment>,
    /// Resources processed without an assignment.
    pub skipped: Vec<SkippedResource>,
    /// Resources beyond the per-run limit, left for a later run.
    pub deferred: Vec<String>,
}

impl Assignment {
    /// Whether the review was marked urgent.
    #[inline]
    pub fn is_urgent(&self) -> bool {
        self.priority == Priority::Urgent
    }

    /// Time allowed for the review.
    pub fn turnaround(&self) -> chrono::Duration {
        self.due_at - self.assigned_at
    }
}

impl AssignmentPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Records a skipped resource.
    pub fn add_skipped(&mut self, resource_id: impl Into<String>, reason: SkipReason) {
        self.skipped.push(SkippedResource {
            resource_id: resource_id.into(),
            reason,
        });
    }

    /// Records a deferred resource.
    pub fn add_deferred(&mut self, resource_id: impl Into<String>) {
        self.deferred.push(resource_id.into());
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Number of resources processed this run (assigned or skipped).
    pub fn processed_count(&self) -> usize {
        self.assignments.len() + self.skipped.len()
    }

    /// Whether the plan contains no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Finds the assignment for a resource.
    pub fn assignment_for_resource(&self, resource_id: &str) -> Option<&Assignment> {
        self.assignments
            .iter()
            .find(|a| a.resource_id == resource_id)
    }

    /// Returns all assignments given to a reviewer.
    pub fn assignments_for_reviewer(&self, reviewer_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.reviewer_id == reviewer_id)
            .collect()
    }

    /// New assignments per reviewer.
    pub fn load_by_reviewer(&self) -> HashMap<String, u32> {
        let mut load: HashMap<String, u32> = HashMap::new();
        for a in &self.assignments {
            *load.entry(a.reviewer_id.clone()).or_insert(0) += 1;
        }
        load
    }

    /// Final state of a resource in this run.
    ///
    /// Deferred and unknown resources are `Unassigned`. A duplicated ID
    /// reports `Assigned` if any occurrence was assigned.
    pub fn state_of(&self, resource_id: &str) -> ResourceState {
        if self.assignment_for_resource(resource_id).is_some() {
            ResourceState::Assigned
        } else if self.skipped.iter().any(|s| s.resource_id == resource_id) {
            ResourceState::Skipped
        } else {
            ResourceState::Unassigned
        }
    }
}
