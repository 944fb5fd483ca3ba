//! Input validation for assignment runs.
//!
//! Checks structural integrity of a pending batch and a roster. The
//! assigner tolerates every issue reported here (it skips duplicates and
//! degrades to defaults), so callers use this to surface data problems
//! upstream, not to gate a run. Detects:
//! - Missing or duplicate IDs
//! - Evidence levels outside 1..=5
//! - Resources with no language
//! - Reviewers holding more work than their capacity

use crate::models::{Resource, Reviewer};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An entity has an empty ID.
    MissingId,
    /// Evidence level outside 1..=5.
    InvalidEvidenceLevel,
    /// A resource declares zero languages.
    InvalidLanguageCount,
    /// Current workload exceeds maximum workload.
    WorkloadExceedsCapacity,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates a pending batch and a reviewer roster.
///
/// Checks:
/// 1. No empty or duplicate resource IDs
/// 2. No empty or duplicate reviewer IDs
/// 3. Evidence levels within 1..=5
/// 4. At least one language per resource
/// 5. No reviewer over capacity
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(resources: &[Resource], roster: &[Reviewer]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut resource_ids = HashSet::new();
    for r in resources {
        if r.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingId,
                format!("Resource titled '{}' has no ID", r.title),
            ));
        } else if !resource_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate resource ID: {}", r.id),
            ));
        }

        if !r.has_valid_evidence_level() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidEvidenceLevel,
                format!(
                    "Resource '{}' has evidence level {} (expected 1-5)",
                    r.id, r.evidence_level
                ),
            ));
        }

        if r.language_count == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidLanguageCount,
                format!("Resource '{}' declares no languages", r.id),
            ));
        }
    }

    let mut reviewer_ids = HashSet::new();
    for r in roster {
        if r.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingId,
                format!("Reviewer '{}' has no ID", r.name),
            ));
        } else if !reviewer_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate reviewer ID: {}", r.id),
            ));
        }

        if r.current_workload > r.max_workload {
            errors.push(ValidationError::new(
                ValidationErrorKind::WorkloadExceedsCapacity,
                format!(
                    "Reviewer '{}' holds {} reviews but capacity is {}",
                    r.id, r.current_workload, r.max_workload
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
