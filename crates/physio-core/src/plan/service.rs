//! The plan generation pipeline.
//!
//! ```text
//! build_prompt -> client.complete (once) -> parse_plan_text
//!                        |                        |
//!                  error / blank               empty
//!                        +-------> fallback <-----+
//!                                     |
//!                                 assemble
//! ```
//!
//! Nothing in here returns an error. Every failure has a fixed recovery,
//! and the outcome says which path was taken.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::llm::TextGenerationClient;
use crate::plan::assemble::assemble;
use crate::plan::fallback::fallback_exercises;
use crate::plan::parser::parse_plan_text;
use crate::plan::prompt::build_prompt;
use crate::plan::types::{ExercisePlan, PlanRequest};
use crate::profile::{ProfileSnapshot, ProfileSource};

/// Why the fallback plan was used instead of generated exercises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The client failed, timed out, or returned blank text.
    UpstreamUnavailable(String),
    /// Text came back but no exercise could be recovered from it.
    UnparseableResponse,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpstreamUnavailable(cause) => write!(f, "upstream unavailable: {cause}"),
            Self::UnparseableResponse => f.write_str("unparseable response"),
        }
    }
}

/// Where the exercises in a plan came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanSource {
    Generated,
    Fallback(FallbackReason),
}

impl PlanSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    /// Short label for responses and logs: `generated` or `fallback`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Fallback(_) => "fallback",
        }
    }
}

impl Serialize for PlanSource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Result of one pipeline run. `plan.exercises` is never empty.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub plan: ExercisePlan,
    pub source: PlanSource,
}

/// Run the pipeline for one request with an already-resolved profile.
pub async fn generate_plan(
    client: &dyn TextGenerationClient,
    request: &PlanRequest,
    profile: Option<&ProfileSnapshot>,
) -> PlanOutcome {
    let prompt = build_prompt(request, profile);
    tracing::debug!(client = client.name(), %prompt, "built plan prompt");

    let (exercises, source) = match client.complete(&prompt).await {
        Err(err) => {
            tracing::warn!(client = client.name(), error = %err, "text generation failed");
            let reason = FallbackReason::UpstreamUnavailable(err.to_string());
            (fallback_exercises(), PlanSource::Fallback(reason))
        }
        Ok(text) if text.trim().is_empty() => {
            tracing::warn!(client = client.name(), "text generation returned blank text");
            let reason = FallbackReason::UpstreamUnavailable("blank response".to_string());
            (fallback_exercises(), PlanSource::Fallback(reason))
        }
        Ok(text) => {
            tracing::debug!(response = %text, "received model output");
            let parsed = parse_plan_text(&text);
            if parsed.is_empty() {
                (
                    fallback_exercises(),
                    PlanSource::Fallback(FallbackReason::UnparseableResponse),
                )
            } else {
                (parsed, PlanSource::Generated)
            }
        }
    };

    let plan = assemble(exercises, request);
    tracing::info!(
        plan_name = %plan.plan_name,
        exercises = plan.exercises.len(),
        source = source.label(),
        "exercise plan ready"
    );
    PlanOutcome { plan, source }
}

/// Pipeline plus profile lookup, shared across concurrent requests.
#[derive(Clone)]
pub struct PlanService {
    client: Arc<dyn TextGenerationClient>,
    profiles: Arc<dyn ProfileSource>,
}

impl PlanService {
    pub fn new(client: Arc<dyn TextGenerationClient>, profiles: Arc<dyn ProfileSource>) -> Self {
        Self { client, profiles }
    }

    /// Resolve the request's profile. Lookup failures read as "no profile".
    pub async fn resolve_profile(&self, request: &PlanRequest) -> Option<ProfileSnapshot> {
        let user_id = request
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())?;
        match self.profiles.lookup(user_id).await {
            Ok(Some(profile)) => Some(profile),
            Ok(None) => {
                tracing::debug!(user_id, "no profile found");
                None
            }
            Err(err) => {
                tracing::warn!(user_id, error = %err, "profile lookup failed");
                None
            }
        }
    }

    pub async fn prompt_for(&self, request: &PlanRequest) -> String {
        let profile = self.resolve_profile(request).await;
        build_prompt(request, profile.as_ref())
    }

    pub async fn generate(&self, request: &PlanRequest) -> PlanOutcome {
        let profile = self.resolve_profile(request).await;
        generate_plan(self.client.as_ref(), request, profile.as_ref()).await
    }
}

impl fmt::Debug for PlanService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanService")
            .field("client", &self.client.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmError, ScriptedClient};
    use crate::profile::{NoProfiles, ProfileDirectory};

    fn request() -> PlanRequest {
        PlanRequest::new("25", vec!["Glutes".to_string()]).with_focus("Strength")
    }

    #[tokio::test]
    async fn generated_path() {
        let client = ScriptedClient::replying(r#"[{"name":"Hip Thrust","reps":"8-12"}]"#);
        let outcome = generate_plan(&client, &request(), None).await;
        assert_eq!(outcome.source, PlanSource::Generated);
        assert_eq!(outcome.plan.exercises.len(), 1);
        assert_eq!(outcome.plan.exercises[0].reps, 8);
        assert_eq!(outcome.plan.plan_name, "Strength 25min (Glutes)");
    }

    #[tokio::test]
    async fn client_error_falls_back() {
        let client = ScriptedClient::failing(LlmError::Timeout("read".to_string()));
        let outcome = generate_plan(&client, &request(), None).await;
        assert!(matches!(
            outcome.source,
            PlanSource::Fallback(FallbackReason::UpstreamUnavailable(_))
        ));
        assert_eq!(outcome.plan.exercises, fallback_exercises());
    }

    #[tokio::test]
    async fn blank_text_falls_back() {
        let client = ScriptedClient::replying("  \n ");
        let outcome = generate_plan(&client, &request(), None).await;
        assert_eq!(
            outcome.source,
            PlanSource::Fallback(FallbackReason::UpstreamUnavailable(
                "blank response".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn unparseable_text_falls_back() {
        let client = ScriptedClient::replying("I recommend walking.");
        let outcome = generate_plan(&client, &request(), None).await;
        assert_eq!(
            outcome.source,
            PlanSource::Fallback(FallbackReason::UnparseableResponse)
        );
        assert_eq!(outcome.plan.exercises.len(), 2);
    }

    #[tokio::test]
    async fn sends_exactly_one_prompt() {
        let client = ScriptedClient::failing(LlmError::Http("refused".to_string()));
        generate_plan(&client, &request(), None).await;
        assert_eq!(client.prompts().len(), 1);
    }

    #[tokio::test]
    async fn service_uses_profile_in_prompt() {
        let profiles = ProfileDirectory::from_toml(
            "[[profiles]]\nuser_id = \"u-7\"\ninjury_history = \"Rotator cuff\"\n",
        )
        .unwrap();
        let client = Arc::new(ScriptedClient::replying("[]"));
        let service = PlanService::new(client.clone(), Arc::new(profiles));

        service.generate(&request().with_user("u-7")).await;
        let prompts = client.prompts();
        assert!(prompts[0].contains("Injury history: Rotator cuff. "));
    }

    #[tokio::test]
    async fn service_without_user_skips_lookup() {
        let client = Arc::new(ScriptedClient::replying("[]"));
        let service = PlanService::new(client.clone(), Arc::new(NoProfiles));
        let prompt = service.prompt_for(&request()).await;
        assert_eq!(prompt, build_prompt(&request(), None));
    }

    #[test]
    fn source_labels() {
        assert_eq!(PlanSource::Generated.label(), "generated");
        let fb = PlanSource::Fallback(FallbackReason::UnparseableResponse);
        assert_eq!(fb.label(), "fallback");
        assert!(fb.is_fallback());
        assert_eq!(serde_json::to_value(&fb).unwrap(), "fallback");
    }
}
