//! Prompt construction for the text-generation service.
//!
//! Pure logic (no I/O). The same request and profile always produce the
//! same bytes, so prompts can be logged, diffed and cached by callers.

use crate::plan::types::PlanRequest;
use crate::profile::ProfileSnapshot;

/// Output contract appended to every prompt.
///
/// The parser treats this shape as the common case, not a guarantee.
pub const OUTPUT_CONTRACT: &str = concat!(
    "Provide 3-5 exercises in JSON format with the following structure: ",
    r#"[{"name": "Exercise Name", "description": "Brief description", "sets": "3", "reps": "10-15", "#,
    r#""equipment": "None/Dumbbells/etc.", "difficulty": "Beginner/Intermediate/Advanced", "#,
    r#""instructions": "Step-by-step instructions"}]"#,
    " Respond with the JSON array only."
);

/// Build the instruction string for a plan request.
///
/// Clause order is fixed: base sentence, optional focus, optional profile
/// goal, optional injury history, then [`OUTPUT_CONTRACT`]. Absent or blank
/// optional values drop their clause entirely.
pub fn build_prompt(request: &PlanRequest, profile: Option<&ProfileSnapshot>) -> String {
    let mut prompt = String::with_capacity(512);

    match request.duration() {
        Some(minutes) => {
            prompt.push_str("Create a ");
            prompt.push_str(minutes);
            prompt.push_str("-minute exercise plan focusing on ");
        }
        None => prompt.push_str("Create an exercise plan focusing on "),
    }
    prompt.push_str(&request.areas_display());

    if let Some(focus) = request.focus() {
        prompt.push_str(" with ");
        prompt.push_str(focus);
        prompt.push_str(" focus");
    }
    prompt.push_str(". ");

    if let Some(profile) = profile {
        if let Some(goal) = profile.goal() {
            prompt.push_str("User's fitness goal: ");
            prompt.push_str(goal);
            prompt.push_str(". ");
        }
        if let Some(injuries) = profile.injuries() {
            prompt.push_str("Injury history: ");
            prompt.push_str(injuries);
            prompt.push_str(". ");
        }
    }

    prompt.push_str(OUTPUT_CONTRACT);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PlanRequest {
        PlanRequest::new("30", vec!["Legs".to_string(), "Core".to_string()])
    }

    fn profile() -> ProfileSnapshot {
        ProfileSnapshot {
            fitness_goal: Some("Lose weight".to_string()),
            injury_history: Some("Lower back strain".to_string()),
            chronic_diseases: Some("Asthma".to_string()),
            equipment_access: Some("Dumbbells".to_string()),
        }
    }

    #[test]
    fn base_clause_without_profile() {
        let prompt = build_prompt(&request(), None);
        assert!(
            prompt.starts_with("Create a 30-minute exercise plan focusing on Legs, Core. "),
            "unexpected prompt: {prompt}"
        );
        assert!(prompt.ends_with(OUTPUT_CONTRACT));
        assert!(!prompt.contains("fitness goal"));
        assert!(!prompt.contains("Injury history"));
    }

    #[test]
    fn focus_clause_is_appended() {
        let prompt = build_prompt(&request().with_focus("Mobility"), None);
        assert!(
            prompt.starts_with(
                "Create a 30-minute exercise plan focusing on Legs, Core with Mobility focus. "
            ),
            "unexpected prompt: {prompt}"
        );
    }

    #[test]
    fn blank_focus_is_ignored() {
        let with_blank = build_prompt(&request().with_focus("   "), None);
        let without = build_prompt(&request(), None);
        assert_eq!(with_blank, without);
    }

    #[test]
    fn profile_clauses_in_order() {
        let prompt = build_prompt(&request(), Some(&profile()));
        let goal = prompt.find("User's fitness goal: Lose weight. ").unwrap();
        let injury = prompt.find("Injury history: Lower back strain. ").unwrap();
        let contract = prompt.find(OUTPUT_CONTRACT).unwrap();
        assert!(goal < injury && injury < contract);
    }

    #[test]
    fn empty_profile_fields_are_suppressed() {
        let blank = ProfileSnapshot {
            fitness_goal: Some(String::new()),
            injury_history: Some("  ".to_string()),
            ..Default::default()
        };
        let prompt = build_prompt(&request(), Some(&blank));
        assert_eq!(prompt, build_prompt(&request(), None));
    }

    #[test]
    fn unused_profile_fields_do_not_leak() {
        let prompt = build_prompt(&request(), Some(&profile()));
        assert!(!prompt.contains("Asthma"));
    }

    #[test]
    fn blank_duration_drops_minutes() {
        let req = PlanRequest::new("", vec!["Arms".to_string()]);
        let prompt = build_prompt(&req, None);
        assert!(prompt.starts_with("Create an exercise plan focusing on Arms. "));
    }

    #[test]
    fn contract_names_every_field() {
        for field in [
            "name",
            "description",
            "sets",
            "reps",
            "equipment",
            "difficulty",
            "instructions",
        ] {
            assert!(
                OUTPUT_CONTRACT.contains(&format!("\"{field}\":")),
                "contract is missing {field}"
            );
        }
        assert!(OUTPUT_CONTRACT.contains("3-5 exercises"));
    }

    #[test]
    fn identical_inputs_give_identical_prompts() {
        let req = request().with_focus("Core");
        let p = profile();
        let first = build_prompt(&req, Some(&p));
        for _ in 0..10 {
            assert_eq!(build_prompt(&req.clone(), Some(&p.clone())), first);
        }
    }
}
