//! The fixed plan used when generation or parsing produces nothing.

use crate::plan::types::{Difficulty, Exercise};

/// Two safe bodyweight exercises with every field populated.
///
/// Deterministic: each call returns an equal vector.
pub fn fallback_exercises() -> Vec<Exercise> {
    vec![
        Exercise {
            name: "Push-ups".to_string(),
            description: "Basic upper body exercise".to_string(),
            sets: 3,
            reps: 10,
            rep_range: None,
            equipment: "None".to_string(),
            difficulty: Difficulty::Beginner,
            instructions: "1. Start in plank position\n2. Lower your body\n3. Push back up"
                .to_string(),
        },
        Exercise {
            name: "Squats".to_string(),
            description: "Basic lower body exercise".to_string(),
            sets: 3,
            reps: 15,
            rep_range: None,
            equipment: "None".to_string(),
            difficulty: Difficulty::Beginner,
            instructions:
                "1. Stand with feet shoulder-width apart\n2. Lower your body\n3. Stand back up"
                    .to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_bodyweight_exercises() {
        let plan = fallback_exercises();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].name, "Push-ups");
        assert_eq!(plan[1].name, "Squats");
        assert!(plan.iter().all(|e| e.equipment == "None"));
    }

    #[test]
    fn every_field_is_populated() {
        for e in fallback_exercises() {
            assert!(!e.name.is_empty());
            assert!(!e.description.is_empty());
            assert!(!e.instructions.is_empty());
            assert!(e.sets > 0 && e.reps > 0);
        }
    }

    #[test]
    fn deterministic() {
        assert_eq!(fallback_exercises(), fallback_exercises());
    }
}
