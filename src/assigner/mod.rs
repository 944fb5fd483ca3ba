//! Greedy assignment and run metrics.
//!
//! # Algorithm
//!
//! `GreedyAssigner` walks the pending batch in order and gives each
//! resource to the best-scoring reviewer that still has capacity. It is not
//! a global optimum, but it is fast, deterministic, and balances load
//! because the running workload feeds back into later scores.
//!
//! # Stats
//!
//! `RunStats` summarises a run: assigned, skipped, and deferred counts,
//! specialty match rate, and post-run utilization.

mod candidates;
mod greedy;
mod stats;

pub use candidates::{filter_candidates, CandidatePool};
pub use greedy::{AssignmentRequest, GreedyAssigner};
pub use stats::RunStats;
