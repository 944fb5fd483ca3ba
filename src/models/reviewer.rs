//! Reviewer profile model.
//!
//! Reviewers are the clinicians who vet marketplace content. Each carries a
//! workload snapshot; the assigner increments workload only on its own
//! working copy, never on the caller's roster.

use serde::{Deserialize, Serialize};

use super::Specialty;

/// A reviewer who can receive review assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviewer {
    /// Unique reviewer identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Declared clinical domain.
    pub specialty: Specialty,
    /// Open review tasks currently held.
    pub current_workload: u32,
    /// Maximum open review tasks.
    pub max_workload: u32,
    /// Whether the reviewer accepts new work at all.
    pub is_available: bool,
}

impl Reviewer {
    /// Creates an available reviewer with no workload and capacity 1.
    pub fn new(id: impl Into<String>, specialty: Specialty) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            specialty,
            current_workload: 0,
            max_workload: 1,
            is_available: true,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets current and maximum workload.
    pub fn with_workload(mut self, current: u32, max: u32) -> Self {
        self.current_workload = current;
        self.max_workload = max;
        self
    }

    /// Sets availability.
    pub fn with_availability(mut self, available: bool) -> Self {
        self.is_available = available;
        self
    }

    /// Free review slots (0 when at or over capacity).
    #[inline]
    pub fn headroom(&self) -> u32 {
        self.max_workload.saturating_sub(self.current_workload)
    }

    /// Whether the reviewer can take one more assignment.
    #[inline]
    pub fn has_capacity(&self) -> bool {
        self.current_workload < self.max_workload
    }

    /// Whether the reviewer is a candidate: available and below capacity.
    #[inline]
    pub fn is_assignable(&self) -> bool {
        self.is_available && self.has_capacity()
    }
}
