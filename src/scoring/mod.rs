//! Match scoring for (resource, reviewer) pairs.
//!
//! Provides the feature extractor that turns a raw resource into scoring
//! signals, additive scoring rules, and a rule engine that sums them and
//! selects the best candidate under an explicit tie-break policy.
//!
//! # Usage
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use review_dispatch::config::ScoringWeights;
//! use review_dispatch::models::{Resource, Reviewer, Specialty};
//! use review_dispatch::scoring::{FeatureExtractor, ScoreEngine};
//!
//! let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
//! let resource = Resource::new("R1", now - Duration::days(1)).with_skill_area("speech therapy");
//! let features = FeatureExtractor::default().extract(&resource, now);
//!
//! let engine = ScoreEngine::from_weights(&ScoringWeights::default());
//! let slp = Reviewer::new("A", Specialty::Slp).with_workload(2, 8);
//! let score = engine.score(&features, &slp);
//! assert_eq!(score.total, 160); // 100 specialty + 10 * 6 free slots
//! ```

mod engine;
mod features;
pub mod rules;

pub use engine::{MatchScore, ScoreEngine, TieBreaker};
pub use features::{Complexity, FeatureExtractor, ResourceFeatures};

use crate::models::Reviewer;
use std::fmt::Debug;

/// Contribution of one rule to a match score.
///
/// **Higher points = better match.** A rule that does not apply returns
/// [`RuleScore::none`] and adds no reason to the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleScore {
    /// Points added to the total.
    pub points: i64,
    /// Audit-trail fragment, present when the rule applied.
    pub reason: Option<String>,
}

impl RuleScore {
    /// The rule did not apply.
    pub fn none() -> Self {
        Self::default()
    }

    /// The rule applied and awards `points`.
    pub fn award(points: i64, reason: impl Into<String>) -> Self {
        Self {
            points,
            reason: Some(reason.into()),
        }
    }

    /// Whether the rule applied.
    #[inline]
    pub fn applied(&self) -> bool {
        self.reason.is_some()
    }
}

/// A scoring rule evaluated per (resource, reviewer) pair.
pub trait ScoringRule: Send + Sync + Debug {
    /// Rule name (e.g., "SPECIALTY", "HEADROOM").
    fn name(&self) -> &'static str;

    /// Scores a reviewer against a resource's features.
    fn evaluate(&self, features: &ResourceFeatures, reviewer: &Reviewer) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
