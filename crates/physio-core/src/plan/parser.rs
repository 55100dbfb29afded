//! Tolerant extraction of exercises from free-form model output.
//!
//! The text service is asked for a JSON array but is free to wrap it in
//! commentary, drop commas, or mix quoting styles. This module does not run
//! a JSON parser. It scans for an array-like region, splits it into
//! per-exercise fragments, and pulls each known `"key": "value"` pair out
//! independently:
//!
//! ```text
//! raw --array_region--> "[ {...} {...} ]"
//!     --split_fragments--> ["[ {...", "...} ]"]
//!     --clean_fragment--> "\"name\": \"Lunges\", ..."
//!     --extract_fields--> RawFields { name: Some("Lunges"), .. }
//!     --into_exercise--> Exercise (defaults filled in)
//! ```
//!
//! Every stage returns an explicit `Option`; nothing here panics or errors.
//! An empty result means "nothing usable", and the caller decides what to
//! do about it.

use std::sync::OnceLock;

use regex::Regex;

use crate::plan::types::{Difficulty, Exercise};

fn fragment_boundary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\}[\s,]*\{").expect("fragment boundary pattern is valid"))
}

fn field_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#""(name|description|sets|reps|equipment|difficulty|instructions)"\s*:\s*"([^"]*)""#,
        )
        .expect("field pattern is valid")
    })
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Parse raw model output into exercises.
///
/// Returns an empty vector when the text has no `[`...`]` region or when no
/// fragment inside it carries a single recognizable field.
pub fn parse_plan_text(raw: &str) -> Vec<Exercise> {
    let Some(region) = array_region(raw) else {
        tracing::warn!("no array region found in model output");
        return Vec::new();
    };
    tracing::debug!(region_len = region.len(), "extracted array region");

    let exercises: Vec<Exercise> = split_fragments(region)
        .filter_map(clean_fragment)
        .filter_map(|fragment| parse_fragment(&fragment))
        .collect();

    if exercises.is_empty() {
        tracing::warn!("array region found but no fragment yielded an exercise");
    } else {
        tracing::debug!(count = exercises.len(), "parsed exercises from model output");
    }
    exercises
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// Slice from the first `[` through the last `]`, inclusive.
pub fn array_region(raw: &str) -> Option<&str> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Split an array region wherever one object closes and the next opens.
///
/// The separator (`}`, any commas/whitespace, `{`) is consumed, so the
/// pieces keep only their interior braces and brackets.
pub fn split_fragments(region: &str) -> impl Iterator<Item = &str> {
    fragment_boundary().split(region)
}

/// Strip every brace and bracket and trim. Blank fragments become `None`.
pub fn clean_fragment(fragment: &str) -> Option<String> {
    let cleaned: String = fragment
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | '[' | ']'))
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Build one exercise from a cleaned fragment, or `None` if no known
/// field is present.
pub fn parse_fragment(fragment: &str) -> Option<Exercise> {
    extract_fields(fragment).into_exercise()
}

// ---------------------------------------------------------------------------
// Field extraction
// ---------------------------------------------------------------------------

/// The raw, uncoerced values found in a fragment.
///
/// Each key is captured independently; the first occurrence wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawFields<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub sets: Option<&'a str>,
    pub reps: Option<&'a str>,
    pub equipment: Option<&'a str>,
    pub difficulty: Option<&'a str>,
    pub instructions: Option<&'a str>,
}

/// Scan a fragment for every quoted `"key": "value"` pair.
pub fn extract_fields(fragment: &str) -> RawFields<'_> {
    field_pattern()
        .captures_iter(fragment)
        .fold(RawFields::default(), |mut fields, caps| {
            let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) else {
                return fields;
            };
            let slot = match key.as_str() {
                "name" => &mut fields.name,
                "description" => &mut fields.description,
                "sets" => &mut fields.sets,
                "reps" => &mut fields.reps,
                "equipment" => &mut fields.equipment,
                "difficulty" => &mut fields.difficulty,
                "instructions" => &mut fields.instructions,
                _ => return fields,
            };
            if slot.is_none() {
                *slot = Some(value.as_str());
            }
            fields
        })
}

impl RawFields<'_> {
    /// `true` when not a single known key was found.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.sets.is_none()
            && self.reps.is_none()
            && self.equipment.is_none()
            && self.difficulty.is_none()
            && self.instructions.is_none()
    }

    /// Apply the per-field recovery policies.
    ///
    /// This is the only place defaults are decided.
    pub fn into_exercise(self) -> Option<Exercise> {
        if self.is_empty() {
            return None;
        }
        let reps = RepCount::recover(self.reps);
        Some(Exercise {
            name: text_or(self.name, Exercise::UNKNOWN_NAME),
            description: text_or(self.description, ""),
            sets: positive_int(self.sets).unwrap_or(Exercise::DEFAULT_SETS),
            reps: reps.value,
            rep_range: reps.range,
            equipment: text_or(self.equipment, Exercise::DEFAULT_EQUIPMENT),
            difficulty: label_or_default(self.difficulty),
            instructions: text_or(self.instructions, ""),
        })
    }
}

// ---------------------------------------------------------------------------
// Recovery policies
// ---------------------------------------------------------------------------

/// Text policy: blank or absent falls back to `default`.
fn text_or(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// Bounded-integer policy: a strictly positive integer or nothing.
fn positive_int(value: Option<&str>) -> Option<u32> {
    value?.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

/// Label policy: unknown difficulty labels read as the default.
fn label_or_default(value: Option<&str>) -> Difficulty {
    value
        .and_then(|v| v.parse::<Difficulty>().ok())
        .unwrap_or_default()
}

/// Range-prefix policy result for repetitions.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RepCount {
    value: u32,
    range: Option<String>,
}

impl RepCount {
    fn recover(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim) else {
            return Self {
                value: Exercise::DEFAULT_REPS,
                range: None,
            };
        };
        match raw.split_once('-') {
            Some((lower, _)) => Self {
                value: positive_int(Some(lower)).unwrap_or(Exercise::DEFAULT_REPS),
                range: Some(raw.to_string()),
            },
            None => Self {
                value: positive_int(Some(raw)).unwrap_or(Exercise::DEFAULT_REPS),
                range: None,
            },
        }
    }
}
