//! Assignment run metrics.
//!
//! Summarises one run for logging and dashboards.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Assigned | Resources that received a reviewer |
//! | Skipped | Processed resources without a reviewer |
//! | Deferred | Resources beyond the per-run limit |
//! | Urgent assigned | Assignments with Urgent priority |
//! | Specialty match rate | Assignments whose reviewer specialty equals the resource's |
//! | Avg score | Mean match score of the assignments |
//! | Avg utilization | Mean `workload / max_workload` after the run |

use std::collections::HashMap;

use crate::models::{AssignmentPlan, Resource, Reviewer};
use crate::scoring::FeatureExtractor;

/// Assignment run indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    /// Resources that received an assignment.
    pub assigned: usize,
    /// Resources processed without an assignment.
    pub skipped: usize,
    /// Resources left for a later run.
    pub deferred: usize,
    /// Assignments marked Urgent.
    pub urgent_assigned: usize,
    /// Fraction of assignments with an exact specialty match (0.0..1.0).
    pub specialty_match_rate: f64,
    /// Mean match score of the assignments.
    pub avg_score: f64,
    /// Workload per reviewer after the run.
    pub workload_by_reviewer: HashMap<String, u32>,
    /// Mean post-run utilization across reviewers with capacity (0.0..1.0+).
    pub avg_utilization: f64,
}

impl RunStats {
    /// Computes stats from a plan and the inputs it was built from.
    ///
    /// # Arguments
    /// * `plan` - The run result.
    /// * `resources` - The pending batch (for specialty lookup).
    /// * `roster` - The roster snapshot the run started from.
    ///
    /// Reviewer IDs are assumed unique, as [`validate_input`] checks.
    /// Roster entries sharing an ID are reported as one reviewer, keyed by
    /// that ID, with the last entry's workload and capacity.
    ///
    /// [`validate_input`]: crate::validation::validate_input
    pub fn calculate(plan: &AssignmentPlan, resources: &[Resource], roster: &[Reviewer]) -> Self {
        let new_load = plan.load_by_reviewer();

        let workload_by_reviewer: HashMap<String, u32> = roster
            .iter()
            .map(|r| {
                let added = new_load.get(&r.id).copied().unwrap_or(0);
                (r.id.clone(), r.current_workload.saturating_add(added))
            })
            .collect();

        let resource_by_id: HashMap<&str, &Resource> =
            resources.iter().map(|r| (r.id.as_str(), r)).collect();
        let reviewer_by_id: HashMap<&str, &Reviewer> =
            roster.iter().map(|r| (r.id.as_str(), r)).collect();

        let mut specialty_matches = 0usize;
        let mut total_score: i64 = 0;
        for a in &plan.assignments {
            total_score = total_score.saturating_add(a.score);
            let resource = resource_by_id.get(a.resource_id.as_str());
            let reviewer = reviewer_by_id.get(a.reviewer_id.as_str());
            if let (Some(res), Some(rev)) = (resource, reviewer) {
                if FeatureExtractor::specialty_of(res) == rev.specialty {
                    specialty_matches += 1;
                }
            }
        }

        let assigned = plan.assignment_count();
        let (specialty_match_rate, avg_score) = if assigned == 0 {
            (0.0, 0.0)
        } else {
            (
                specialty_matches as f64 / assigned as f64,
                total_score as f64 / assigned as f64,
            )
        };

        let utilizations: Vec<f64> = reviewer_by_id
            .values()
            .filter(|r| r.max_workload > 0)
            .map(|r| workload_by_reviewer[&r.id] as f64 / r.max_workload as f64)
            .collect();
        let avg_utilization = if utilizations.is_empty() {
            0.0
        } else {
            utilizations.iter().sum::<f64>() / utilizations.len() as f64
        };

        Self {
            assigned,
            skipped: plan.skipped.len(),
            deferred: plan.deferred.len(),
            urgent_assigned: plan.assignments.iter().filter(|a| a.is_urgent()).count(),
            specialty_match_rate,
            avg_score,
            workload_by_reviewer,
            avg_utilization,
        }
    }

    /// Whether every pending resource got a reviewer this run.
    pub fn fully_assigned(&self) -> bool {
        self.skipped == 0 && self.deferred == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assigner::GreedyAssigner;
    use crate::models::Specialty;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    fn make_resource(id: &str, tag: &str, age_days: i64) -> Resource {
        Resource::new(id, now() - Duration::days(age_days)).with_skill_area(tag)
    }

    #[test]
    fn test_stats_basic() {
        let resources = vec![
            make_resource("R1", "speech", 7),
            make_resource("R2", "sensory", 1),
        ];
        let roster = vec![
            Reviewer::new("A", Specialty::Slp).with_workload(0, 2),
            Reviewer::new("B", Specialty::General).with_workload(1, 4),
        ];
        let plan = GreedyAssigner::default().assign(&resources, &roster, now());
        let stats = RunStats::calculate(&plan, &resources, &roster);

        // R1 -> A (SLP match, urgent). R2 -> B (generalist beats SLP mismatch).
        assert_eq!(stats.assigned, 2);
        assert_eq!(stats.urgent_assigned, 1);
        assert!((stats.specialty_match_rate - 0.5).abs() < 1e-10);
        assert_eq!(stats.workload_by_reviewer["A"], 1);
        assert_eq!(stats.workload_by_reviewer["B"], 2);
        // A: 1/2, B: 2/4 -> 0.5
        assert!((stats.avg_utilization - 0.5).abs() < 1e-10);
        assert!(stats.fully_assigned());
    }

    #[test]
    fn test_stats_avg_score() {
        let resources = vec![make_resource("R1", "speech", 1)];
        let roster = vec![Reviewer::new("A", Specialty::Slp).with_workload(0, 3)];
        let plan = GreedyAssigner::default().assign(&resources, &roster, now());
        let stats = RunStats::calculate(&plan, &resources, &roster);
        assert!((stats.avg_score - 130.0).abs() < 1e-10);
        assert!((stats.specialty_match_rate - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_stats_skipped_not_fully_assigned() {
        let resources = vec![make_resource("R1", "speech", 1)];
        let roster = vec![Reviewer::new("A", Specialty::Slp).with_workload(3, 3)];
        let plan = GreedyAssigner::default().assign(&resources, &roster, now());
        let stats = RunStats::calculate(&plan, &resources, &roster);
        assert_eq!(stats.skipped, 1);
        assert!(!stats.fully_assigned());
        assert!((stats.avg_utilization - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_stats_duplicate_reviewer_ids_merge_into_one_entry() {
        let resources = vec![make_resource("R1", "speech", 1)];
        let roster = vec![
            Reviewer::new("A", Specialty::Slp).with_workload(0, 4),
            Reviewer::new("A", Specialty::Slp).with_workload(1, 2),
        ];
        let plan = GreedyAssigner::default().assign(&resources, &roster, now());
        let stats = RunStats::calculate(&plan, &resources, &roster);

        assert_eq!(stats.assigned, 1);
        assert_eq!(stats.workload_by_reviewer.len(), 1);
        // Last entry wins: 1 held + 1 new, capacity 2.
        assert_eq!(stats.workload_by_reviewer["A"], 2);
        assert!((stats.avg_utilization - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_stats_empty() {
        let stats = RunStats::calculate(&AssignmentPlan::new(), &[], &[]);
        assert_eq!(stats.assigned, 0);
        assert!((stats.avg_score - 0.0).abs() < 1e-10);
        assert!((stats.avg_utilization - 0.0).abs() < 1e-10);
        assert!(stats.workload_by_reviewer.is_empty());
        assert!(stats.fully_assigned());
    }
}
