//! Engine configuration.
//!
//! Layered the usual way: defaults, then an optional TOML file, then
//! `REVIEW_*` environment overrides, then [`EngineConfig::validate`].
//!
//! ```toml
//! max_resources_per_run = 20
//! due_offset_days = 3
//! urgency_age_days = 5
//! tie_breaker = "first_in_roster"
//!
//! [weights]
//! specialty_match = 100
//! generalist_match = 50
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::scoring::TieBreaker;

/// Default number of pending resources processed per run.
pub const DEFAULT_MAX_RESOURCES_PER_RUN: usize = 20;
/// Default review turnaround in days.
pub const DEFAULT_DUE_OFFSET_DAYS: i64 = 3;
/// Default age after which a pending resource counts as urgent.
pub const DEFAULT_URGENCY_AGE_DAYS: i64 = 5;
/// Upper bound for day-count settings (ten years).
pub const MAX_DAY_COUNT: i64 = 3650;
/// Upper bound for a single scoring weight.
pub const MAX_WEIGHT: i64 = 1_000_000;

/// Points awarded by the scoring rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Reviewer specialty equals resource specialty.
    pub specialty_match: i64,
    /// Reviewer is a generalist (fallback match).
    pub generalist_match: i64,
    /// Per free review slot.
    pub headroom_per_slot: i64,
    /// Urgent resource and reviewer has slack.
    pub urgency_bonus: i64,
    /// Highest current workload that still earns the urgency bonus.
    pub urgency_max_workload: u32,
    /// High-complexity resource and specialist reviewer.
    pub complexity_bonus: i64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            specialty_match: 100,
            generalist_match: 50,
            headroom_per_slot: 10,
            urgency_bonus: 30,
            urgency_max_workload: 3,
            complexity_bonus: 10,
        }
    }
}

/// Assignment engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pending resources considered per run; the rest are deferred.
    pub max_resources_per_run: usize,
    /// Days between assignment and due date.
    pub due_offset_days: i64,
    /// Pending age (days) beyond which a resource is urgent.
    pub urgency_age_days: i64,
    /// How equal-score candidates are ordered.
    pub tie_breaker: TieBreaker,
    /// Scoring rule weights.
    pub weights: ScoringWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_resources_per_run: DEFAULT_MAX_RESOURCES_PER_RUN,
            due_offset_days: DEFAULT_DUE_OFFSET_DAYS,
            urgency_age_days: DEFAULT_URGENCY_AGE_DAYS,
            tie_breaker: TieBreaker::default(),
            weights: ScoringWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Sets the per-run resource limit.
    pub fn with_max_resources_per_run(mut self, max: usize) -> Self {
        self.max_resources_per_run = max;
        self
    }

    /// Sets the due-date offset in days.
    pub fn with_due_offset_days(mut self, days: i64) -> Self {
        self.due_offset_days = days;
        self
    }

    /// Sets the urgency age threshold in days.
    pub fn with_urgency_age_days(mut self, days: i64) -> Self {
        self.urgency_age_days = days;
        self
    }

    /// Sets the tie-break policy.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Sets the scoring weights.
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Parses configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Loading engine configuration");
        Self::from_toml_str(&contents)
    }

    /// Loads configuration with layered precedence:
    /// 1. Defaults
    /// 2. TOML file at `path`, if given and present
    /// 3. `REVIEW_*` environment variables
    ///
    /// The result is validated before it is returned.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) if p.exists() => Self::from_toml_file(p)?,
            Some(p) => {
                tracing::warn!(path = %p.display(), "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `REVIEW_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup.
    ///
    /// Recognised keys: `REVIEW_MAX_RESOURCES_PER_RUN`,
    /// `REVIEW_DUE_OFFSET_DAYS`, `REVIEW_URGENCY_AGE_DAYS`,
    /// `REVIEW_TIE_BREAKER` (`first_in_roster` or `by_id`).
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        macro_rules! apply_override {
            ($field:ident, $env:literal) => {
                if let Some(raw) = lookup($env) {
                    self.$field = raw
                        .trim()
                        .parse()
                        .map_err(|e| ConfigError::invalid($env, &raw, format!("{e}")))?;
                }
            };
        }

        apply_override!(max_resources_per_run, "REVIEW_MAX_RESOURCES_PER_RUN");
        apply_override!(due_offset_days, "REVIEW_DUE_OFFSET_DAYS");
        apply_override!(urgency_age_days, "REVIEW_URGENCY_AGE_DAYS");
        apply_override!(tie_breaker, "REVIEW_TIE_BREAKER");

        Ok(())
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_resources_per_run == 0 {
            return Err(ConfigError::invalid(
                "max_resources_per_run",
                self.max_resources_per_run,
                "must be at least 1",
            ));
        }
        if self.due_offset_days < 0 {
            return Err(ConfigError::invalid(
                "due_offset_days",
                self.due_offset_days,
                "must not be negative",
            ));
        }
        if self.urgency_age_days < 0 {
            return Err(ConfigError::invalid(
                "urgency_age_days",
                self.urgency_age_days,
                "must not be negative",
            ));
        }
        if self.due_offset_days > MAX_DAY_COUNT {
            return Err(ConfigError::invalid(
                "due_offset_days",
                self.due_offset_days,
                format!("must be at most {MAX_DAY_COUNT}"),
            ));
        }
        if self.urgency_age_days > MAX_DAY_COUNT {
            return Err(ConfigError::invalid(
                "urgency_age_days",
                self.urgency_age_days,
                format!("must be at most {MAX_DAY_COUNT}"),
            ));
        }
        self.weights.validate()
    }
}

impl ScoringWeights {
    /// Checks that every point weight lies in `0..=MAX_WEIGHT`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("weights.specialty_match", self.specialty_match),
            ("weights.generalist_match", self.generalist_match),
            ("weights.headroom_per_slot", self.headroom_per_slot),
            ("weights.urgency_bonus", self.urgency_bonus),
            ("weights.complexity_bonus", self.complexity_bonus),
        ];
        for (key, value) in weights {
            if !(0..=MAX_WEIGHT).contains(&value) {
                return Err(ConfigError::invalid(
                    key,
                    value,
                    format!("must be between 0 and {MAX_WEIGHT}"),
                ));
            }
        }
        Ok(())
    }
}
