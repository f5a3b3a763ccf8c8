//! Exercise catalog compiled into the binary
//!
//! Serves as the offline fallback when the remote exercise API has no key
//! configured or cannot be reached.

use super::{ExerciseSource, SourceResult};
use async_trait::async_trait;
use fitbuddy_shared::{Exercise, ExerciseQuery};

struct BundledExercise {
    name: &'static str,
    kind: &'static str,
    muscle: &'static str,
    equipment: &'static str,
    difficulty: &'static str,
    instructions: &'static str,
}

impl From<&BundledExercise> for Exercise {
    fn from(value: &BundledExercise) -> Self {
        Exercise {
            name: value.name.to_string(),
            exercise_type: value.kind.to_string(),
            muscle: value.muscle.to_string(),
            equipment: value.equipment.to_string(),
            difficulty: value.difficulty.to_string(),
            instructions: value.instructions.to_string(),
        }
    }
}

/// Static catalog filtered with wildcard semantics
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledCatalog;

impl BundledCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Exercises matching the query
    pub fn exercises(&self, query: &ExerciseQuery) -> Vec<Exercise> {
        let muscle = query.muscle_constraint();
        let difficulty = query.difficulty_constraint();
        CATALOG
            .iter()
            .filter(|e| muscle.map_or(true, |m| e.muscle == m))
            .filter(|e| difficulty.map_or(true, |d| e.difficulty == d))
            .map(Exercise::from)
            .collect()
    }

    pub fn len(&self) -> usize {
        CATALOG.len()
    }

    pub fn is_empty(&self) -> bool {
        CATALOG.is_empty()
    }
}

#[async_trait]
impl ExerciseSource for BundledCatalog {
    async fn get_exercises(&self, query: &ExerciseQuery) -> SourceResult<Vec<Exercise>> {
        Ok(self.exercises(query))
    }
}

const CATALOG: &[BundledExercise] = &[
    BundledExercise {
        name: "Barbell Bench Press",
        kind: "strength",
        muscle: "chest",
        equipment: "barbell",
        difficulty: "intermediate",
        instructions: "Lie on a flat bench with feet on the floor. Grip the bar with hands slightly wider than shoulder-width apart. Lower the bar to your chest, then press it back up to the starting position.",
    },
    BundledExercise {
        name: "Push-ups",
        kind: "strength",
        muscle: "chest",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "Start in a plank position with hands under shoulders. Lower your body until chest nearly touches the floor, then push back up.",
    },
    BundledExercise {
        name: "Incline Dumbbell Press",
        kind: "strength",
        muscle: "chest",
        equipment: "dumbbell",
        difficulty: "intermediate",
        instructions: "Lie on an incline bench with dumbbells. Press weights up until arms are extended, then lower with control back to chest level.",
    },
    BundledExercise {
        name: "Chest Fly",
        kind: "strength",
        muscle: "chest",
        equipment: "dumbbell",
        difficulty: "beginner",
        instructions: "Lie on a bench with dumbbells extended above chest. Lower weights out to sides in wide arc, then bring back together.",
    },
    BundledExercise {
        name: "Dumbbell Bicep Curls",
        kind: "strength",
        muscle: "biceps",
        equipment: "dumbbell",
        difficulty: "beginner",
        instructions: "Stand with feet shoulder-width apart, holding dumbbells at your sides. Curl the weights up to shoulder level, keeping elbows stationary. Lower back down with control.",
    },
    BundledExercise {
        name: "Hammer Curls",
        kind: "strength",
        muscle: "biceps",
        equipment: "dumbbell",
        difficulty: "beginner",
        instructions: "Hold dumbbells with palms facing each other. Curl weights up while maintaining neutral grip throughout the movement.",
    },
    BundledExercise {
        name: "Barbell Curls",
        kind: "strength",
        muscle: "biceps",
        equipment: "barbell",
        difficulty: "intermediate",
        instructions: "Stand holding barbell with underhand grip. Curl bar up to shoulder level, keeping elbows close to body.",
    },
    BundledExercise {
        name: "Tricep Dips",
        kind: "strength",
        muscle: "triceps",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "Place hands on parallel bars or bench. Lower body by bending elbows until upper arms are parallel to floor, then push back up.",
    },
    BundledExercise {
        name: "Overhead Tricep Extension",
        kind: "strength",
        muscle: "triceps",
        equipment: "dumbbell",
        difficulty: "intermediate",
        instructions: "Hold dumbbell overhead with both hands. Lower weight behind head by bending elbows, then extend back to start.",
    },
    BundledExercise {
        name: "Tricep Kickbacks",
        kind: "strength",
        muscle: "triceps",
        equipment: "dumbbell",
        difficulty: "beginner",
        instructions: "Bend forward at waist with dumbbell in hand. Extend arm back and up, squeezing tricep at top of movement.",
    },
    BundledExercise {
        name: "Squats",
        kind: "strength",
        muscle: "quadriceps",
        equipment: "barbell",
        difficulty: "intermediate",
        instructions: "Stand with feet shoulder-width apart. Lower your body by bending knees and hips, keeping back straight. Push through heels to return to starting position.",
    },
    BundledExercise {
        name: "Lunges",
        kind: "strength",
        muscle: "quadriceps",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "Step forward with one leg, lowering hips until both knees are bent at 90 degrees. Push back to starting position and repeat with other leg.",
    },
    BundledExercise {
        name: "Leg Press",
        kind: "strength",
        muscle: "quadriceps",
        equipment: "machine",
        difficulty: "beginner",
        instructions: "Sit in leg press machine with feet on platform. Push platform away by extending legs, then slowly return to starting position.",
    },
    BundledExercise {
        name: "Bulgarian Split Squats",
        kind: "strength",
        muscle: "quadriceps",
        equipment: "body_only",
        difficulty: "intermediate",
        instructions: "Place back foot on elevated surface. Lower front knee until thigh is parallel to ground, then push back up.",
    },
    BundledExercise {
        name: "Romanian Deadlifts",
        kind: "strength",
        muscle: "hamstrings",
        equipment: "barbell",
        difficulty: "intermediate",
        instructions: "Hold barbell with straight arms. Hinge at hips, lowering weight along legs while keeping back straight.",
    },
    BundledExercise {
        name: "Calf Raises",
        kind: "strength",
        muscle: "calves",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "Stand on edge of step. Lower heels below step level, then raise up onto toes as high as possible.",
    },
    BundledExercise {
        name: "Deadlifts",
        kind: "strength",
        muscle: "lower_back",
        equipment: "barbell",
        difficulty: "intermediate",
        instructions: "Stand with feet hip-width apart, barbell over feet. Bend at hips and knees to grip bar. Lift by extending hips and knees, keeping back straight.",
    },
    BundledExercise {
        name: "Pull-ups",
        kind: "strength",
        muscle: "lats",
        equipment: "pull_up_bar",
        difficulty: "intermediate",
        instructions: "Hang from a pull-up bar with hands shoulder-width apart. Pull yourself up until chin is over the bar, then lower with control.",
    },
    BundledExercise {
        name: "Lat Pulldown",
        kind: "strength",
        muscle: "lats",
        equipment: "cable",
        difficulty: "beginner",
        instructions: "Sit at lat pulldown machine. Grip bar wider than shoulders and pull down to upper chest, squeezing shoulder blades together.",
    },
    BundledExercise {
        name: "Bent Over Rows",
        kind: "strength",
        muscle: "middle_back",
        equipment: "barbell",
        difficulty: "intermediate",
        instructions: "Bend forward at waist with barbell. Pull bar to lower chest, squeezing shoulder blades together.",
    },
    BundledExercise {
        name: "Face Pulls",
        kind: "strength",
        muscle: "shoulders",
        equipment: "cable",
        difficulty: "beginner",
        instructions: "Pull rope attachment toward face, separating hands at end of movement. Great for rear delts and posture.",
    },
    BundledExercise {
        name: "Shoulder Press",
        kind: "strength",
        muscle: "shoulders",
        equipment: "dumbbell",
        difficulty: "intermediate",
        instructions: "Sit or stand with dumbbells at shoulder height. Press weights overhead until arms are fully extended, then lower back to starting position.",
    },
    BundledExercise {
        name: "Lateral Raises",
        kind: "strength",
        muscle: "shoulders",
        equipment: "dumbbell",
        difficulty: "beginner",
        instructions: "Hold dumbbells at sides. Raise arms out to sides until parallel to ground, then lower with control.",
    },
    BundledExercise {
        name: "Front Raises",
        kind: "strength",
        muscle: "shoulders",
        equipment: "dumbbell",
        difficulty: "beginner",
        instructions: "Hold dumbbells in front of thighs. Raise arms straight forward to shoulder height, then lower slowly.",
    },
    BundledExercise {
        name: "Plank",
        kind: "strength",
        muscle: "abdominals",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "Get into a forearm plank position with elbows under shoulders. Keep body in a straight line from head to heels, engaging core muscles.",
    },
    BundledExercise {
        name: "Russian Twists",
        kind: "strength",
        muscle: "abdominals",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "Sit on floor with knees bent and feet lifted. Lean back slightly and rotate torso from side to side, touching the floor beside you.",
    },
    BundledExercise {
        name: "Mountain Climbers",
        kind: "cardio",
        muscle: "abdominals",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "Start in plank position. Alternate bringing knees to chest in a running motion, keeping core engaged and hips level.",
    },
    BundledExercise {
        name: "Bicycle Crunches",
        kind: "strength",
        muscle: "abdominals",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "Lie on back with hands behind head. Alternate bringing opposite elbow to knee in a pedaling motion.",
    },
    BundledExercise {
        name: "Hanging Leg Raises",
        kind: "strength",
        muscle: "abdominals",
        equipment: "pull_up_bar",
        difficulty: "intermediate",
        instructions: "Hang from bar with straight arms. Raise legs to parallel with ground, then lower with control.",
    },
    BundledExercise {
        name: "Dead Bug",
        kind: "strength",
        muscle: "abdominals",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "Lie on back with arms extended up and knees at 90 degrees. Lower opposite arm and leg, then return. Great for core stability.",
    },
    BundledExercise {
        name: "Burpees",
        kind: "cardio",
        muscle: "full_body",
        equipment: "body_only",
        difficulty: "intermediate",
        instructions: "Start standing, drop into a squat with hands on ground. Jump feet back into plank, do a push-up, jump feet to hands, then jump up with arms overhead.",
    },
    BundledExercise {
        name: "Jumping Jacks",
        kind: "cardio",
        muscle: "full_body",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "Start with feet together. Jump while spreading legs and raising arms overhead. Return to start position.",
    },
    BundledExercise {
        name: "High Knees",
        kind: "cardio",
        muscle: "quadriceps",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "Run in place while bringing knees up to hip level. Pump arms vigorously for maximum effect.",
    },
    BundledExercise {
        name: "Jump Rope",
        kind: "cardio",
        muscle: "calves",
        equipment: "jump_rope",
        difficulty: "beginner",
        instructions: "Jump over rope as it passes under feet. Stay on balls of feet and maintain steady rhythm.",
    },
    BundledExercise {
        name: "Box Jumps",
        kind: "plyometrics",
        muscle: "quadriceps",
        equipment: "box",
        difficulty: "intermediate",
        instructions: "Stand facing box. Jump onto box landing softly with knees bent. Step down and repeat.",
    },
    BundledExercise {
        name: "Cat-Cow Stretch",
        kind: "stretching",
        muscle: "lower_back",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "On hands and knees, alternate between arching back (cow) and rounding spine (cat). Great for spinal mobility.",
    },
    BundledExercise {
        name: "Childs Pose",
        kind: "stretching",
        muscle: "lower_back",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "Kneel and sit back on heels, extending arms forward on ground. Relax and breathe deeply.",
    },
    BundledExercise {
        name: "Downward Dog",
        kind: "stretching",
        muscle: "hamstrings",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "Start in plank, push hips up forming inverted V. Press heels toward ground and relax head.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_names_are_unique() {
        let names: HashSet<&str> = CATALOG.iter().map(|e| e.name).collect();
        assert_eq!(names.len(), CATALOG.len());
        assert_eq!(BundledCatalog::new().len(), 38);
    }

    #[rstest]
    #[case(None, None, 38)]
    #[case(Some("all"), None, 38)]
    #[case(Some("chest"), None, 4)]
    #[case(Some("abdominals"), Some("beginner"), 5)]
    #[case(Some("lats"), Some("expert"), 0)]
    fn test_filtering(#[case] muscle: Option<&str>, #[case] difficulty: Option<&str>, #[case] expected: usize) {
        let query = ExerciseQuery {
            muscle: muscle.map(str::to_string),
            difficulty: difficulty.map(str::to_string),
        };
        assert_eq!(BundledCatalog::new().exercises(&query).len(), expected);
    }

    #[tokio::test]
    async fn test_default_search_matches_type() {
        let results = BundledCatalog::new().search_exercises("stretching").await;
        assert_eq!(results.len(), 3);
    }
}
