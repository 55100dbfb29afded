//! Final plan assembly: name derivation and request metadata.

use crate::plan::fallback::fallback_exercises;
use crate::plan::types::{Exercise, ExercisePlan, PlanRequest};

/// Label used when the request names no focus.
pub const DEFAULT_FOCUS: &str = "General Fitness";

/// Derive the display name for a plan.
///
/// `<focus or "General Fitness"> <duration>min (<areas>)`, where the
/// duration and area parts are dropped when blank or empty.
pub fn plan_name(request: &PlanRequest) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3);
    parts.push(request.focus().unwrap_or(DEFAULT_FOCUS).to_string());
    if let Some(minutes) = request.duration() {
        parts.push(format!("{minutes}min"));
    }
    if !request.targeted_areas.is_empty() {
        parts.push(format!("({})", request.areas_display()));
    }
    parts.join(" ").trim().to_string()
}

/// Combine exercises with request metadata.
///
/// An empty `exercises` list is replaced by the fallback plan, so the
/// result is never empty.
pub fn assemble(exercises: Vec<Exercise>, request: &PlanRequest) -> ExercisePlan {
    let exercises = if exercises.is_empty() {
        tracing::warn!("assembling with no exercises, substituting fallback plan");
        fallback_exercises()
    } else {
        exercises
    };

    ExercisePlan {
        plan_name: plan_name(request),
        duration: request.duration.clone(),
        targeted_areas: request.areas_display(),
        exercises,
    }
}
