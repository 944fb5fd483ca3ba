//! Feature extraction for scoring.
//!
//! Derives the three signals the rules consume (specialty, urgency,
//! complexity) from a resource and the run's reference time. Malformed or
//! missing tag data falls back to the generalist specialty.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_URGENCY_AGE_DAYS;
use crate::models::{Resource, Specialty};

/// Review complexity of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Complexity {
    /// Printable, single-language, weak evidence.
    Low,
    /// Strong evidence or interactive.
    Medium,
    /// Multilingual, strong evidence, and interactive.
    High,
}

/// Scoring signals derived from one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFeatures {
    /// Clinical domain inferred from the tags.
    pub specialty: Specialty,
    /// Whether the resource needs expedited review.
    pub urgent: bool,
    /// Review complexity.
    pub complexity: Complexity,
}

impl ResourceFeatures {
    /// Creates features directly (mostly useful for rule tests).
    pub fn new(specialty: Specialty, urgent: bool, complexity: Complexity) -> Self {
        Self {
            specialty,
            urgent,
            complexity,
        }
    }
}

/// Extracts [`ResourceFeatures`] from resources.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    urgency_age: Duration,
}

impl FeatureExtractor {
    /// Creates an extractor that marks resources older than
    /// `urgency_age_days` as urgent.
    ///
    /// A threshold too large to represent never triggers by age.
    pub fn new(urgency_age_days: i64) -> Self {
        Self {
            urgency_age: Duration::try_days(urgency_age_days).unwrap_or(Duration::MAX),
        }
    }

    /// Extracts all signals for a resource at reference time `now`.
    pub fn extract(&self, resource: &Resource, now: DateTime<Utc>) -> ResourceFeatures {
        ResourceFeatures {
            specialty: Self::specialty_of(resource),
            urgent: self.is_urgent(resource, now),
            complexity: Self::complexity_of(resource),
        }
    }

    /// Infers the specialty from the resource tags.
    ///
    /// Keywords are checked in [`Specialty::ALL`] order, so a resource
    /// tagged both "speech" and "sensory" maps to SLP.
    pub fn specialty_of(resource: &Resource) -> Specialty {
        let tags = resource.normalized_tags();
        if tags.is_empty() {
            return Specialty::General;
        }
        Specialty::ALL
            .into_iter()
            .find(|sp| sp.keywords().iter().any(|kw| tags.contains(kw)))
            .unwrap_or(Specialty::General)
    }

    /// Urgent if pending longer than the threshold, or titled "urgent".
    pub fn is_urgent(&self, resource: &Resource, now: DateTime<Utc>) -> bool {
        let waited_too_long = now - resource.created_at > self.urgency_age;
        waited_too_long || resource.title.to_lowercase().contains("urgent")
    }

    /// High: multilingual, strong evidence, and interactive.
    /// Medium: strong evidence or interactive. Otherwise Low.
    pub fn complexity_of(resource: &Resource) -> Complexity {
        let strong_evidence = resource.effective_evidence_level() >= 4;
        if resource.language_count > 1 && strong_evidence && resource.interactive {
            Complexity::High
        } else if strong_evidence || resource.interactive {
            Complexity::Medium
        } else {
            Complexity::Low
        }
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_URGENCY_AGE_DAYS)
    }
}
