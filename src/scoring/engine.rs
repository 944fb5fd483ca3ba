//! Rule engine for match scoring.
//!
//! Sums the points of all configured rules for a (resource, reviewer) pair
//! and selects the best candidate. Equal totals are resolved by an explicit
//! [`TieBreaker`] rather than by whatever order a sort happens to leave.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::Arc;

use super::rules::{ComplexityBonus, SpecialtyMatch, UrgencyBonus, WorkloadHeadroom};
use super::{ResourceFeatures, RuleScore, ScoringRule};
use crate::config::ScoringWeights;
use crate::models::Reviewer;

/// How candidates with equal scores are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreaker {
    /// Earliest candidate in roster order wins (default).
    #[default]
    FirstInRoster,
    /// Lexicographically smallest reviewer ID wins.
    ById,
}

impl FromStr for TieBreaker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first_in_roster" => Ok(TieBreaker::FirstInRoster),
            "by_id" => Ok(TieBreaker::ById),
            other => Err(format!(
                "unknown tie breaker '{other}', expected first_in_roster or by_id"
            )),
        }
    }
}

/// Total score of one (resource, reviewer) pair with its audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchScore {
    /// Sum of all rule points.
    pub total: i64,
    /// Reasons of the rules that applied, in rule order.
    pub reasons: Vec<String>,
}

impl MatchScore {
    /// Reasons joined into a single audit string.
    pub fn reason(&self) -> String {
        self.reasons.join("; ")
    }
}

/// A composable rule engine for reviewer matching.
///
/// # Example
/// ```
/// use review_dispatch::scoring::{ScoreEngine, TieBreaker};
/// use review_dispatch::scoring::rules;
///
/// let engine = ScoreEngine::new()
///     .with_rule(rules::SpecialtyMatch::default())
///     .with_rule(rules::WorkloadHeadroom::default())
///     .with_tie_breaker(TieBreaker::ById);
/// assert_eq!(engine.rule_count(), 2);
/// ```
#[derive(Clone)]
pub struct ScoreEngine {
    rules: Vec<Arc<dyn ScoringRule>>,
    tie_breaker: TieBreaker,
}

impl ScoreEngine {
    /// Creates an engine with no rules.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::FirstInRoster,
        }
    }

    /// Creates the standard engine: specialty, headroom, urgency, complexity.
    pub fn from_weights(weights: &ScoringWeights) -> Self {
        Self::new()
            .with_rule(SpecialtyMatch::from(weights))
            .with_rule(WorkloadHeadroom::from(weights))
            .with_rule(UrgencyBonus::from(weights))
            .with_rule(ComplexityBonus::from(weights))
    }

    /// Adds a rule.
    pub fn with_rule<R: ScoringRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the tie-break policy.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Number of configured rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// The tie-break policy in effect.
    pub fn tie_breaker(&self) -> TieBreaker {
        self.tie_breaker
    }

    /// Evaluates a pair and returns each rule's contribution.
    pub fn evaluate(&self, features: &ResourceFeatures, reviewer: &Reviewer) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(features, reviewer))
            .collect()
    }

    /// Scores a pair.
    pub fn score(&self, features: &ResourceFeatures, reviewer: &Reviewer) -> MatchScore {
        let mut score = MatchScore::default();
        for contribution in self.evaluate(features, reviewer) {
            score.total = score.total.saturating_add(contribution.points);
            if let Some(reason) = contribution.reason {
                score.reasons.push(reason);
            }
        }
        score
    }

    /// Scores all candidates and orders them best first.
    ///
    /// Returns `(index into candidates, score)` pairs.
    pub fn rank(
        &self,
        features: &ResourceFeatures,
        candidates: &[Reviewer],
    ) -> Vec<(usize, MatchScore)> {
        let mut ranked: Vec<(usize, MatchScore)> = candidates
            .iter()
            .enumerate()
            .map(|(i, r)| (i, self.score(features, r)))
            .collect();
        // Stable sort: FirstInRoster keeps input order among equals.
        ranked.sort_by(|(ia, sa), (ib, sb)| {
            self.compare(sa.total, &candidates[*ia], sb.total, &candidates[*ib])
        });
        ranked
    }

    /// Returns the best candidate, or `None` when there are no candidates.
    pub fn select_best(
        &self,
        features: &ResourceFeatures,
        candidates: &[Reviewer],
    ) -> Option<(usize, MatchScore)> {
        let mut best: Option<(usize, MatchScore)> = None;
        for (i, reviewer) in candidates.iter().enumerate() {
            let score = self.score(features, reviewer);
            let better = match &best {
                None => true,
                Some((bi, bs)) => {
                    self.compare(score.total, reviewer, bs.total, &candidates[*bi])
                        == Ordering::Less
                }
            };
            if better {
                best = Some((i, score));
            }
        }
        best
    }

    /// Orders two scored candidates: `Less` means `a` ranks ahead of `b`.
    fn compare(&self, score_a: i64, a: &Reviewer, score_b: i64, b: &Reviewer) -> Ordering {
        score_b.cmp(&score_a).then_with(|| match self.tie_breaker {
            TieBreaker::FirstInRoster => Ordering::Equal,
            TieBreaker::ById => a.id.cmp(&b.id),
        })
    }
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self::from_weights(&ScoringWeights::default())
    }
}

impl std::fmt::Debug for ScoreEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreEngine")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Specialty;
    use crate::scoring::rules;
    use crate::scoring::Complexity;

    fn reviewer(id: &str, specialty: Specialty, current: u32, max: u32) -> Reviewer {
        Reviewer::new(id, specialty).with_workload(current, max)
    }

    fn slp_urgent_complex() -> ResourceFeatures {
        ResourceFeatures::new(Specialty::Slp, true, Complexity::High)
    }

    #[test]
    fn test_score_sums_rules_and_reasons() {
        let engine = ScoreEngine::default();
        let a = reviewer("A", Specialty::Slp, 2, 8);
        let score = engine.score(&slp_urgent_complex(), &a);
        // 100 specialty + 60 headroom + 30 urgency + 10 complexity
        assert_eq!(score.total, 200);
        assert_eq!(score.reasons.len(), 4);
        assert_eq!(
            score.reason(),
            "SLP specialty match; 6 open review slots; available for urgent review; \
             specialist for high-complexity content"
        );
    }

    #[test]
    fn test_specialist_beats_less_loaded_generalist() {
        let engine = ScoreEngine::default();
        let candidates = vec![
            reviewer("B", Specialty::General, 1, 8),
            reviewer("A", Specialty::Slp, 2, 8),
        ];
        let (idx, score) = engine.select_best(&slp_urgent_complex(), &candidates).unwrap();
        assert_eq!(candidates[idx].id, "A");
        assert_eq!(score.total, 200);

        let b = engine.score(&slp_urgent_complex(), &candidates[0]);
        assert_eq!(b.total, 150); // 50 + 70 + 30
    }

    #[test]
    fn test_first_in_roster_tie_break() {
        let engine = ScoreEngine::default();
        let f = ResourceFeatures::new(Specialty::Ot, false, Complexity::Low);
        let candidates = vec![
            reviewer("Z", Specialty::Ot, 1, 5),
            reviewer("A", Specialty::Ot, 1, 5),
        ];
        let (idx, _) = engine.select_best(&f, &candidates).unwrap();
        assert_eq!(candidates[idx].id, "Z");
    }

    #[test]
    fn test_by_id_tie_break() {
        let engine = ScoreEngine::default().with_tie_breaker(TieBreaker::ById);
        let f = ResourceFeatures::new(Specialty::Ot, false, Complexity::Low);
        let candidates = vec![
            reviewer("Z", Specialty::Ot, 1, 5),
            reviewer("A", Specialty::Ot, 1, 5),
        ];
        let (idx, _) = engine.select_best(&f, &candidates).unwrap();
        assert_eq!(candidates[idx].id, "A");
    }

    #[test]
    fn test_tie_break_does_not_override_score() {
        let engine = ScoreEngine::default().with_tie_breaker(TieBreaker::ById);
        let f = ResourceFeatures::new(Specialty::Ot, false, Complexity::Low);
        let candidates = vec![
            reviewer("Z", Specialty::Ot, 0, 5),
            reviewer("A", Specialty::Ot, 1, 5),
        ];
        let (idx, _) = engine.select_best(&f, &candidates).unwrap();
        assert_eq!(candidates[idx].id, "Z");
    }

    #[test]
    fn test_rank_agrees_with_select_best() {
        for tb in [TieBreaker::FirstInRoster, TieBreaker::ById] {
            let engine = ScoreEngine::default().with_tie_breaker(tb);
            let f = ResourceFeatures::new(Specialty::Pt, true, Complexity::Medium);
            let candidates = vec![
                reviewer("C", Specialty::General, 2, 6),
                reviewer("B", Specialty::Pt, 4, 6),
                reviewer("A", Specialty::General, 2, 6),
                reviewer("D", Specialty::Pt, 0, 2),
            ];
            let ranked = engine.rank(&f, &candidates);
            let best = engine.select_best(&f, &candidates).unwrap();
            assert_eq!(ranked[0].0, best.0);
            assert!(ranked.windows(2).all(|w| w[0].1.total >= w[1].1.total));
        }
    }

    #[test]
    fn test_empty_candidates() {
        let engine = ScoreEngine::default();
        assert!(engine.select_best(&slp_urgent_complex(), &[]).is_none());
        assert!(engine.rank(&slp_urgent_complex(), &[]).is_empty());
    }

    #[test]
    fn test_custom_rule_set() {
        let engine = ScoreEngine::new().with_rule(rules::WorkloadHeadroom { per_slot: 1 });
        let f = slp_urgent_complex();
        let candidates = vec![
            reviewer("A", Specialty::Slp, 4, 5),
            reviewer("B", Specialty::General, 0, 5),
        ];
        let (idx, score) = engine.select_best(&f, &candidates).unwrap();
        assert_eq!(candidates[idx].id, "B");
        assert_eq!(score.total, 5);
    }

    #[test]
    fn test_score_total_saturates() {
        let engine = ScoreEngine::new()
            .with_rule(rules::SpecialtyMatch {
                exact: i64::MAX,
                generalist: 0,
            })
            .with_rule(rules::UrgencyBonus {
                bonus: i64::MAX,
                max_workload: 10,
            });
        let score = engine.score(&slp_urgent_complex(), &reviewer("A", Specialty::Slp, 0, 5));
        assert_eq!(score.total, i64::MAX);
    }

    #[test]
    fn test_evaluate_per_rule() {
        let engine = ScoreEngine::default();
        let r = reviewer("A", Specialty::General, 4, 5);
        let scores = engine.evaluate(&slp_urgent_complex(), &r);
        let points: Vec<i64> = scores.iter().map(|s| s.points).collect();
        assert_eq!(points, vec![50, 10, 0, 0]);
    }

    #[test]
    fn test_tie_breaker_parse() {
        assert_eq!("by_id".parse::<TieBreaker>().unwrap(), TieBreaker::ById);
        assert_eq!(
            "First_In_Roster".parse::<TieBreaker>().unwrap(),
            TieBreaker::FirstInRoster
        );
        assert!("random".parse::<TieBreaker>().is_err());
    }

    #[test]
    fn test_debug_lists_rules() {
        let dbg = format!("{:?}", ScoreEngine::default());
        assert!(dbg.contains("SPECIALTY"));
        assert!(dbg.contains("COMPLEXITY"));
    }
}
