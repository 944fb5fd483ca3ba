//! Reviewer assignment engine for clinical resource review.
//!
//! Pairs pending therapy resources with clinical reviewers: infers each
//! resource's specialty from its skill-area tags, scores every reviewer
//! with spare capacity through a set of additive rules, and picks the best
//! one per resource, feeding the running workload back into later scores.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Resource`, `Reviewer`, `Specialty`,
//!   `Assignment`, `AssignmentPlan`
//! - **`scoring`**: Feature extraction, `ScoringRule` trait, built-in rules,
//!   and the `ScoreEngine` that ranks candidates
//! - **`assigner`**: `GreedyAssigner` and `RunStats`
//! - **`service`**: Collaborator traits and `AssignmentService`, which
//!   persists and announces a run
//! - **`config`**: `EngineConfig` from TOML with environment overrides
//! - **`validation`**: Input integrity checks (duplicate IDs, capacity)
//! - **`error`**: Error types
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, Utc};
//! use review_dispatch::assigner::GreedyAssigner;
//! use review_dispatch::models::{Resource, Reviewer, Specialty};
//!
//! let now = Utc::now();
//! let resources = vec![
//!     Resource::new("R1", now - Duration::days(1)).with_skill_area("gross motor"),
//! ];
//! let roster = vec![
//!     Reviewer::new("pt-1", Specialty::Pt).with_workload(1, 4),
//!     Reviewer::new("gen-1", Specialty::General).with_workload(0, 4),
//! ];
//!
//! let plan = GreedyAssigner::default().assign(&resources, &roster, now);
//! assert_eq!(plan.assignments[0].reviewer_id, "pt-1");
//! ```

pub mod assigner;
pub mod config;
pub mod error;
pub mod models;
pub mod scoring;
pub mod service;
pub mod validation;

pub use error::{ConfigError, Error, Result};
