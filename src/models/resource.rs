//! Resource model.
//!
//! A resource is a content item (worksheet, activity pack, assessment)
//! submitted to the marketplace and waiting for clinical review. The
//! assignment engine only reads it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest accepted evidence level.
pub const MIN_EVIDENCE_LEVEL: u8 = 1;
/// Highest accepted evidence level.
pub const MAX_EVIDENCE_LEVEL: u8 = 5;

/// A content item pending review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Free-text skill-area tags as entered by the submitter.
    #[serde(default)]
    pub skill_areas: Vec<String>,
    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// Strength of the supporting evidence (1 = anecdotal, 5 = strong).
    pub evidence_level: u8,
    /// Whether the resource is interactive (digital activity vs. printable).
    #[serde(default)]
    pub interactive: bool,
    /// Number of languages the resource ships in.
    pub language_count: u32,
}

impl Resource {
    /// Creates a resource with the given ID and submission time.
    ///
    /// Defaults: empty title and tags, evidence level 1, not interactive,
    /// one language.
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            skill_areas: Vec::new(),
            created_at,
            evidence_level: MIN_EVIDENCE_LEVEL,
            interactive: false,
            language_count: 1,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Adds a skill-area tag.
    pub fn with_skill_area(mut self, tag: impl Into<String>) -> Self {
        self.skill_areas.push(tag.into());
        self
    }

    /// Sets the evidence level, clamped to 1..=5.
    pub fn with_evidence_level(mut self, level: u8) -> Self {
        self.evidence_level = level.clamp(MIN_EVIDENCE_LEVEL, MAX_EVIDENCE_LEVEL);
        self
    }

    /// Marks the resource as interactive.
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Sets the number of languages.
    pub fn with_language_count(mut self, count: u32) -> Self {
        self.language_count = count;
        self
    }

    /// All tags joined into one lowercase string for keyword scanning.
    pub fn normalized_tags(&self) -> String {
        self.skill_areas
            .iter()
            .map(|t| t.trim().to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether the evidence level lies within 1..=5.
    pub fn has_valid_evidence_level(&self) -> bool {
        (MIN_EVIDENCE_LEVEL..=MAX_EVIDENCE_LEVEL).contains(&self.evidence_level)
    }

    /// Evidence level clamped to 1..=5, for scoring.
    pub fn effective_evidence_level(&self) -> u8 {
        self.evidence_level.clamp(MIN_EVIDENCE_LEVEL, MAX_EVIDENCE_LEVEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_resource_builder() {
        let r = Resource::new("R1", t0())
            .with_title("Articulation Cards")
            .with_skill_area("Speech")
            .with_skill_area("Articulation")
            .with_evidence_level(4)
            .with_interactive(true)
            .with_language_count(2);

        assert_eq!(r.id, "R1");
        assert_eq!(r.title, "Articulation Cards");
        assert_eq!(r.skill_areas.len(), 2);
        assert_eq!(r.evidence_level, 4);
        assert!(r.interactive);
        assert_eq!(r.language_count, 2);
        assert_eq!(r.created_at, t0());
    }

    #[test]
    fn test_evidence_clamping() {
        assert_eq!(Resource::new("a", t0()).with_evidence_level(9).evidence_level, 5);
        assert_eq!(Resource::new("b", t0()).with_evidence_level(0).evidence_level, 1);
    }

    #[test]
    fn test_normalized_tags() {
        let r = Resource::new("R1", t0())
            .with_skill_area("  Fine Motor ")
            .with_skill_area("SENSORY");
        assert_eq!(r.normalized_tags(), "fine motor sensory");
        assert_eq!(Resource::new("R2", t0()).normalized_tags(), "");
    }

    #[test]
    fn test_deserialize_missing_tags() {
        let json = r#"{
            "id": "R9",
            "title": "Untagged",
            "created_at": "2024-03-01T09:00:00Z",
            "evidence_level": 7,
            "language_count": 1
        }"#;
        let r: Resource = serde_json::from_str(json).unwrap();
        assert!(r.skill_areas.is_empty());
        assert!(!r.interactive);
        // Raw deserialization keeps the value; validation reports it.
        assert!(!r.has_valid_evidence_level());
        assert_eq!(r.effective_evidence_level(), 5);
    }

    #[test]
    fn test_effective_evidence_level() {
        let mut r = Resource::new("R1", t0());
        r.evidence_level = 0;
        assert_eq!(r.effective_evidence_level(), 1);
        r.evidence_level = 3;
        assert_eq!(r.effective_evidence_level(), 3);
        r.evidence_level = 200;
        assert_eq!(r.effective_evidence_level(), 5);
    }
}
