//! Clinical specialty model.
//!
//! Reviewers declare one specialty; resources are mapped to one by the
//! feature extractor. Matching compares the two values directly, so the
//! label parsing lives here and nowhere in the scoring path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A clinical domain used to match reviewers to content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Specialty {
    /// Speech-language pathology.
    #[serde(rename = "SLP")]
    Slp,
    /// Occupational therapy.
    #[serde(rename = "OT")]
    Ot,
    /// Physical therapy.
    #[serde(rename = "PT")]
    Pt,
    /// Applied behavior analysis.
    #[serde(rename = "ABA")]
    Aba,
    /// Generalist (no declared domain).
    #[default]
    General,
}

impl Specialty {
    /// All specialties in keyword-scan order, generalist last.
    pub const ALL: [Specialty; 5] = [
        Specialty::Slp,
        Specialty::Ot,
        Specialty::Pt,
        Specialty::Aba,
        Specialty::General,
    ];

    /// Canonical label ("SLP", "OT", "PT", "ABA", "General").
    pub fn label(self) -> &'static str {
        match self {
            Specialty::Slp => "SLP",
            Specialty::Ot => "OT",
            Specialty::Pt => "PT",
            Specialty::Aba => "ABA",
            Specialty::General => "General",
        }
    }

    /// Lowercase tag keywords that identify this specialty.
    ///
    /// The generalist has none; it is the fallback when nothing matches.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Specialty::Slp => &["speech", "language", "communication"],
            Specialty::Ot => &["fine motor", "sensory", "occupational"],
            Specialty::Pt => &["gross motor", "physical", "mobility"],
            Specialty::Aba => &["behavior", "autism", "aba"],
            Specialty::General => &[],
        }
    }

    /// Whether this is the generalist fallback.
    #[inline]
    pub fn is_general(self) -> bool {
        self == Specialty::General
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a specialty label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown specialty label: '{0}'")]
pub struct ParseSpecialtyError(pub String);

impl FromStr for Specialty {
    type Err = ParseSpecialtyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Specialty::ALL
            .into_iter()
            .find(|sp| sp.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseSpecialtyError(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("slp".parse::<Specialty>().unwrap(), Specialty::Slp);
        assert_eq!(" OT ".parse::<Specialty>().unwrap(), Specialty::Ot);
        assert_eq!("general".parse::<Specialty>().unwrap(), Specialty::General);
        assert!("nursing".parse::<Specialty>().is_err());
    }

    #[test]
    fn test_display_round_trips_label() {
        for sp in Specialty::ALL {
            assert_eq!(sp.to_string().parse::<Specialty>().unwrap(), sp);
        }
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Specialty::Aba).unwrap();
        assert_eq!(json, "\"ABA\"");
        let back: Specialty = serde_json::from_str("\"PT\"").unwrap();
        assert_eq!(back, Specialty::Pt);
    }

    #[test]
    fn test_general_has_no_keywords() {
        assert!(Specialty::General.keywords().is_empty());
        assert!(Specialty::General.is_general());
        assert!(!Specialty::Slp.is_general());
    }
}
