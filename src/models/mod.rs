//! Review assignment domain models.
//!
//! Provides the data types that flow through an assignment run: the
//! content waiting for review, the reviewers who can take it, and the
//! resulting plan.
//!
//! # Domain Mappings
//!
//! | review-dispatch | Marketplace | Clinic |
//! |-----------------|-------------|--------|
//! | Resource | Submitted listing | Handout / activity |
//! | Reviewer | Content moderator | Supervising therapist |
//! | Assignment | Review task | Peer-review request |
//! | AssignmentPlan | Review queue update | Weekly review roster |

mod plan;
mod resource;
mod reviewer;
mod specialty;

pub use plan::{Assignment, AssignmentPlan, Priority, ResourceState, SkipReason, SkippedResource};
pub use resource::{Resource, MAX_EVIDENCE_LEVEL, MIN_EVIDENCE_LEVEL};
pub use reviewer::Reviewer;
pub use specialty::{ParseSpecialtyError, Specialty};
