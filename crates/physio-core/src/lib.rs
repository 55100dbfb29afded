//! Exercise plan generation core.
//!
//! Turns a [`plan::PlanRequest`] (plus an optional [`profile::ProfileSnapshot`])
//! into an instruction string for a text-generation service, calls the
//! service once through the [`llm::TextGenerationClient`] trait, and parses
//! whatever comes back into a non-empty [`plan::ExercisePlan`].
//!
//! ```text
//! build_prompt --> TextGenerationClient --> parse_plan_text
//!                                               |
//!                        (empty or failed) --> fallback_exercises
//!                                               |
//!                                            assemble --> ExercisePlan
//! ```

pub mod llm;
pub mod plan;
pub mod profile;
