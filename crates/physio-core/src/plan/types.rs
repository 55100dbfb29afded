//! Request and result types for exercise plan generation.
//!
//! Wire names are camelCase so the HTTP surface accepts the same JSON the
//! mobile client already sends (`targetedAreas`, `focusType`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::profile::non_blank;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Caller-supplied parameters describing the plan to generate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    /// Opaque identifier resolvable to a profile snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Session length in minutes, string-encoded (e.g. `"30"`).
    #[serde(default)]
    pub duration: String,
    /// Ordered body-region labels. Must be non-empty for a valid request.
    #[serde(default)]
    pub targeted_areas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_areas: Vec<String>,
}

impl PlanRequest {
    pub fn new(duration: impl Into<String>, targeted_areas: Vec<String>) -> Self {
        Self {
            duration: duration.into(),
            targeted_areas,
            ..Default::default()
        }
    }

    pub fn with_focus(mut self, focus: impl Into<String>) -> Self {
        self.focus_type = Some(focus.into());
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Trimmed duration, or `None` when blank.
    pub fn duration(&self) -> Option<&str> {
        non_blank(Some(self.duration.as_str()))
    }

    /// Trimmed focus label, or `None` when absent or blank.
    pub fn focus(&self) -> Option<&str> {
        non_blank(self.focus_type.as_deref())
    }

    /// Targeted areas joined for display (`"Abs, Back"`).
    pub fn areas_display(&self) -> String {
        self.targeted_areas.join(", ")
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Difficulty label attached to each exercise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        };
        f.write_str(s)
    }
}

impl FromStr for Difficulty {
    type Err = DifficultyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(DifficultyParseError(s.to_owned())),
        }
    }
}

// Same labels as `FromStr`, so stored plans read back case-insensitively.
impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// Error returned when parsing an unknown [`Difficulty`] label.
#[derive(Debug, Clone)]
pub struct DifficultyParseError(pub String);

impl fmt::Display for DifficultyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid difficulty: {:?}", self.0)
    }
}

impl std::error::Error for DifficultyParseError {}

// ---------------------------------------------------------------------------
// Exercise
// ---------------------------------------------------------------------------

/// A single, fully-defaulted exercise record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: String,
    pub description: String,
    pub sets: u32,
    /// Numeric repetitions. For a range like `"10-15"` this is the lower bound.
    pub reps: u32,
    /// The verbatim range text when the source gave one (e.g. `"10-15"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rep_range: Option<String>,
    pub equipment: String,
    pub difficulty: Difficulty,
    pub instructions: String,
}

impl Exercise {
    pub const UNKNOWN_NAME: &str = "Unknown Exercise";
    pub const DEFAULT_SETS: u32 = 3;
    pub const DEFAULT_REPS: u32 = 10;
    pub const DEFAULT_EQUIPMENT: &str = "None";

    /// Repetitions as shown to a user: the range if one was given.
    pub fn reps_display(&self) -> String {
        match &self.rep_range {
            Some(range) => range.clone(),
            None => self.reps.to_string(),
        }
    }
}

impl Default for Exercise {
    fn default() -> Self {
        Self {
            name: Self::UNKNOWN_NAME.to_string(),
            description: String::new(),
            sets: Self::DEFAULT_SETS,
            reps: Self::DEFAULT_REPS,
            rep_range: None,
            equipment: Self::DEFAULT_EQUIPMENT.to_string(),
            difficulty: Difficulty::default(),
            instructions: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// The assembled plan handed back to the caller. `exercises` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePlan {
    pub plan_name: String,
    pub duration: String,
    pub targeted_areas: String,
    pub exercises: Vec<Exercise>,
}
