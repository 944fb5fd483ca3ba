//! Built-in scoring rules.
//!
//! # Rules
//!
//! - **SPECIALTY**: exact specialty match, or generalist fallback
//! - **HEADROOM**: rewards reviewers with more free slots
//! - **URGENCY**: urgent content goes to reviewers with slack
//! - **COMPLEXITY**: complex content goes to specialists
//!
//! # Score Convention
//! All rules return higher points for better matches. Points are additive.

use super::{Complexity, ResourceFeatures, RuleScore, ScoringRule};
use crate::config::ScoringWeights;
use crate::models::Reviewer;

/// Specialty match.
///
/// Awards `exact` points when the reviewer's specialty equals the
/// resource's, otherwise `generalist` points when the reviewer is a
/// generalist. A generalist reviewing General content is an exact match.
#[derive(Debug, Clone, Copy)]
pub struct SpecialtyMatch {
    /// Points when the specialties are equal.
    pub exact: i64,
    /// Points for a generalist reviewer on specialist content.
    pub generalist: i64,
}

impl Default for SpecialtyMatch {
    fn default() -> Self {
        Self {
            exact: 100,
            generalist: 50,
        }
    }
}

impl ScoringRule for SpecialtyMatch {
    fn name(&self) -> &'static str {
        "SPECIALTY"
    }

    fn evaluate(&self, features: &ResourceFeatures, reviewer: &Reviewer) -> RuleScore {
        if reviewer.specialty == features.specialty {
            RuleScore::award(self.exact, format!("{} specialty match", reviewer.specialty))
        } else if reviewer.specialty.is_general() {
            RuleScore::award(self.generalist, "generalist reviewer")
        } else {
            RuleScore::none()
        }
    }

    fn description(&self) -> &'static str {
        "Specialty Match"
    }
}

/// Workload headroom.
///
/// `per_slot * (max_workload - current_workload)`. Spreads work toward
/// less-loaded reviewers.
#[derive(Debug, Clone, Copy)]
pub struct WorkloadHeadroom {
    /// Points per free review slot.
    pub per_slot: i64,
}

impl Default for WorkloadHeadroom {
    fn default() -> Self {
        Self { per_slot: 10 }
    }
}

impl ScoringRule for WorkloadHeadroom {
    fn name(&self) -> &'static str {
        "HEADROOM"
    }

    fn evaluate(&self, _features: &ResourceFeatures, reviewer: &Reviewer) -> RuleScore {
        let slots = reviewer.headroom();
        if slots == 0 {
            return RuleScore::none();
        }
        let noun = if slots == 1 { "slot" } else { "slots" };
        RuleScore::award(
            self.per_slot.saturating_mul(i64::from(slots)),
            format!("{slots} open review {noun}"),
        )
    }

    fn description(&self) -> &'static str {
        "Workload Headroom"
    }
}

/// Urgent turnaround.
///
/// Applies when the resource is urgent and the reviewer currently holds at
/// most `max_workload` reviews.
#[derive(Debug, Clone, Copy)]
pub struct UrgencyBonus {
    /// Points awarded.
    pub bonus: i64,
    /// Highest current workload that still qualifies.
    pub max_workload: u32,
}

impl Default for UrgencyBonus {
    fn default() -> Self {
        Self {
            bonus: 30,
            max_workload: 3,
        }
    }
}

impl ScoringRule for UrgencyBonus {
    fn name(&self) -> &'static str {
        "URGENCY"
    }

    fn evaluate(&self, features: &ResourceFeatures, reviewer: &Reviewer) -> RuleScore {
        if features.urgent && reviewer.current_workload <= self.max_workload {
            RuleScore::award(self.bonus, "available for urgent review")
        } else {
            RuleScore::none()
        }
    }

    fn description(&self) -> &'static str {
        "Urgent Turnaround"
    }
}

/// Specialist for complex content.
///
/// Applies when complexity is High and the reviewer is not a generalist.
#[derive(Debug, Clone, Copy)]
pub struct ComplexityBonus {
    /// Points awarded.
    pub bonus: i64,
}

impl Default for ComplexityBonus {
    fn default() -> Self {
        Self { bonus: 10 }
    }
}

impl ScoringRule for ComplexityBonus {
    fn name(&self) -> &'static str {
        "COMPLEXITY"
    }

    fn evaluate(&self, features: &ResourceFeatures, reviewer: &Reviewer) -> RuleScore {
        if features.complexity == Complexity::High && !reviewer.specialty.is_general() {
            RuleScore::award(self.bonus, "specialist for high-complexity content")
        } else {
            RuleScore::none()
        }
    }

    fn description(&self) -> &'static str {
        "Complexity Specialist"
    }
}

impl From<&ScoringWeights> for SpecialtyMatch {
    fn from(w: &ScoringWeights) -> Self {
        Self {
            exact: w.specialty_match,
            generalist: w.generalist_match,
        }
    }
}

impl From<&ScoringWeights> for WorkloadHeadroom {
    fn from(w: &ScoringWeights) -> Self {
        Self {
            per_slot: w.headroom_per_slot,
        }
    }
}

impl From<&ScoringWeights> for UrgencyBonus {
    fn from(w: &ScoringWeights) -> Self {
        Self {
            bonus: w.urgency_bonus,
            max_workload: w.urgency_max_workload,
        }
    }
}

impl From<&ScoringWeights> for ComplexityBonus {
    fn from(w: &ScoringWeights) -> Self {
        Self {
            bonus: w.complexity_bonus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Specialty;

    fn features(specialty: Specialty, urgent: bool, complexity: Complexity) -> ResourceFeatures {
        ResourceFeatures::new(specialty, urgent, complexity)
    }

    fn reviewer(specialty: Specialty, current: u32, max: u32) -> Reviewer {
        Reviewer::new("U", specialty).with_workload(current, max)
    }

    #[test]
    fn test_specialty_exact() {
        let f = features(Specialty::Ot, false, Complexity::Low);
        let s = SpecialtyMatch::default().evaluate(&f, &reviewer(Specialty::Ot, 0, 5));
        assert_eq!(s.points, 100);
        assert_eq!(s.reason.as_deref(), Some("OT specialty match"));
    }

    #[test]
    fn test_specialty_generalist_fallback() {
        let f = features(Specialty::Ot, false, Complexity::Low);
        let s = SpecialtyMatch::default().evaluate(&f, &reviewer(Specialty::General, 0, 5));
        assert_eq!(s.points, 50);
    }

    #[test]
    fn test_specialty_general_content_general_reviewer_is_exact() {
        let f = features(Specialty::General, false, Complexity::Low);
        let s = SpecialtyMatch::default().evaluate(&f, &reviewer(Specialty::General, 0, 5));
        assert_eq!(s.points, 100);
    }

    #[test]
    fn test_specialty_mismatch() {
        let f = features(Specialty::Slp, false, Complexity::Low);
        let s = SpecialtyMatch::default().evaluate(&f, &reviewer(Specialty::Pt, 0, 5));
        assert_eq!(s, RuleScore::none());
        assert!(!s.applied());
    }

    #[test]
    fn test_headroom() {
        let f = features(Specialty::Slp, false, Complexity::Low);
        let s = WorkloadHeadroom::default().evaluate(&f, &reviewer(Specialty::Slp, 2, 8));
        assert_eq!(s.points, 60);
        assert_eq!(s.reason.as_deref(), Some("6 open review slots"));

        let one = WorkloadHeadroom::default().evaluate(&f, &reviewer(Specialty::Slp, 7, 8));
        assert_eq!(one.reason.as_deref(), Some("1 open review slot"));

        let full = WorkloadHeadroom::default().evaluate(&f, &reviewer(Specialty::Slp, 8, 8));
        assert_eq!(full.points, 0);
    }

    #[test]
    fn test_headroom_saturates() {
        let f = features(Specialty::Slp, false, Complexity::Low);
        let rule = WorkloadHeadroom { per_slot: i64::MAX };
        assert_eq!(rule.evaluate(&f, &reviewer(Specialty::Slp, 0, 8)).points, i64::MAX);
    }

    #[test]
    fn test_urgency_requires_slack() {
        let f = features(Specialty::Slp, true, Complexity::Low);
        let rule = UrgencyBonus::default();
        assert_eq!(rule.evaluate(&f, &reviewer(Specialty::Slp, 3, 8)).points, 30);
        assert_eq!(rule.evaluate(&f, &reviewer(Specialty::Slp, 4, 8)).points, 0);

        let calm = features(Specialty::Slp, false, Complexity::Low);
        assert_eq!(rule.evaluate(&calm, &reviewer(Specialty::Slp, 0, 8)).points, 0);
    }

    #[test]
    fn test_complexity_specialist_only() {
        let f = features(Specialty::Aba, false, Complexity::High);
        let rule = ComplexityBonus::default();
        assert_eq!(rule.evaluate(&f, &reviewer(Specialty::Pt, 0, 5)).points, 10);
        assert_eq!(rule.evaluate(&f, &reviewer(Specialty::General, 0, 5)).points, 0);

        let medium = features(Specialty::Aba, false, Complexity::Medium);
        assert_eq!(rule.evaluate(&medium, &reviewer(Specialty::Aba, 0, 5)).points, 0);
    }

    #[test]
    fn test_rules_from_weights() {
        let w = ScoringWeights {
            specialty_match: 7,
            generalist_match: 3,
            headroom_per_slot: 2,
            urgency_bonus: 11,
            urgency_max_workload: 0,
            complexity_bonus: 5,
        };
        let f = features(Specialty::Slp, true, Complexity::High);
        let r = reviewer(Specialty::Slp, 0, 4);
        assert_eq!(SpecialtyMatch::from(&w).evaluate(&f, &r).points, 7);
        assert_eq!(WorkloadHeadroom::from(&w).evaluate(&f, &r).points, 8);
        assert_eq!(UrgencyBonus::from(&w).evaluate(&f, &r).points, 11);
        assert_eq!(ComplexityBonus::from(&w).evaluate(&f, &r).points, 5);
    }
}
