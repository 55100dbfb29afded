//! `physio prompt`, `physio parse` and `physio generate`.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Args;

use physio_core::llm::ChatCompletionsClient;
use physio_core::plan::{
    PlanRequest, PlanService, PlanSource, fallback_exercises, parse_plan_text,
};
use physio_core::profile::{NoProfiles, ProfileDirectory, ProfileSource};

use crate::config::PhysioConfig;

/// Plan parameters shared by `prompt` and `generate`.
#[derive(Debug, Clone, Args)]
pub struct PlanArgs {
    /// Session length in minutes
    #[arg(long, default_value = "30")]
    pub duration: String,
    /// Body area to target (repeatable, in order)
    #[arg(long = "area", required = true)]
    pub areas: Vec<String>,
    /// Focus label (e.g. Strength, Mobility)
    #[arg(long)]
    pub focus: Option<String>,
    /// Free-form session goals
    #[arg(long)]
    pub goals: Option<String>,
    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
    /// Body area to avoid (repeatable)
    #[arg(long = "exclude")]
    pub excluded: Vec<String>,
    /// User whose profile personalizes the prompt
    #[arg(long)]
    pub user_id: Option<String>,
}

impl PlanArgs {
    pub fn into_request(self) -> Result<PlanRequest> {
        let targeted_areas: Vec<String> = self
            .areas
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        if targeted_areas.is_empty() {
            bail!("at least one non-blank --area is required");
        }
        Ok(PlanRequest {
            user_id: self.user_id,
            duration: self.duration,
            targeted_areas,
            focus_type: self.focus,
            goals: self.goals,
            notes: self.notes,
            excluded_areas: self.excluded,
        })
    }
}

/// Build the profile source named by the resolved config.
pub fn load_profiles(config: &PhysioConfig) -> Result<Arc<dyn ProfileSource>> {
    match &config.profiles_path {
        Some(path) => {
            let directory = ProfileDirectory::load(path)
                .with_context(|| format!("failed to load profiles from {}", path.display()))?;
            tracing::info!(path = %path.display(), profiles = directory.len(), "profiles loaded");
            Ok(Arc::new(directory))
        }
        None => Ok(Arc::new(NoProfiles)),
    }
}

/// Build the full pipeline service from resolved config.
pub fn build_service(config: &PhysioConfig) -> Result<PlanService> {
    let client = ChatCompletionsClient::new(config.llm.clone())
        .context("failed to create text generation client")?;
    let profiles = load_profiles(config)?;
    Ok(PlanService::new(Arc::new(client), profiles))
}

/// Print the prompt that would be sent for a request.
pub async fn run_prompt(config: &PhysioConfig, args: PlanArgs) -> Result<()> {
    let request = args.into_request()?;
    let service = build_service(config)?;
    println!("{}", service.prompt_for(&request).await);
    Ok(())
}

/// Run the full pipeline and print the plan as JSON.
pub async fn run_generate(config: &PhysioConfig, args: PlanArgs) -> Result<()> {
    let request = args.into_request()?;
    let service = build_service(config)?;
    let outcome = service.generate(&request).await;
    if let PlanSource::Fallback(reason) = &outcome.source {
        eprintln!("warning: using fallback plan ({reason})");
    }
    println!("{}", serde_json::to_string_pretty(&outcome.plan)?);
    Ok(())
}

/// Parse raw model output from a file (or `-` for stdin) and print the
/// exercises as JSON.
pub fn run_parse(input: &str, raw: bool) -> Result<()> {
    let text = read_input(input)?;
    let mut exercises = parse_plan_text(&text);
    if exercises.is_empty() {
        eprintln!("warning: no exercises could be parsed from {input}");
        if !raw {
            exercises = fallback_exercises();
        }
    }
    println!("{}", serde_json::to_string_pretty(&exercises)?);
    Ok(())
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    let path = Path::new(input);
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
