//! Exercise plans: request types, prompt construction, tolerant parsing,
//! fallback, assembly, and the pipeline that ties them together.

pub mod assemble;
pub mod fallback;
pub mod parser;
pub mod prompt;
pub mod service;
pub mod types;

pub use assemble::{DEFAULT_FOCUS, assemble, plan_name};
pub use fallback::fallback_exercises;
pub use parser::parse_plan_text;
pub use prompt::{OUTPUT_CONTRACT, build_prompt};
pub use service::{FallbackReason, PlanOutcome, PlanService, PlanSource, generate_plan};
pub use types::{Difficulty, Exercise, ExercisePlan, PlanRequest};
