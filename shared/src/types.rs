//! Request, patch, and snapshot types
//!
//! Snapshots are the typed read-only views each store hands to the
//! presentation layer.

use crate::models::{
    Exercise, Filter, Notification, NotificationType, SavedWorkout, User, WaterDay,
    WorkoutExercise,
};
use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

// ============================================================================
// Auth
// ============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Partial profile update; absent fields are left alone
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub age: Option<u32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
}

impl ProfilePatch {
    /// Merge the provided fields into a user
    pub fn apply(&self, user: &mut User) {
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(first_name) = &self.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(phone) = &self.phone {
            user.phone = Some(phone.clone());
        }
        if let Some(age) = self.age {
            user.age = Some(age);
        }
        if let Some(weight) = self.weight {
            user.weight = Some(weight);
        }
        if let Some(height) = self.height {
            user.height = Some(height);
        }
    }
}

/// Auth store view
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSnapshot {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub error: Option<String>,
}

// ============================================================================
// Exercise catalog
// ============================================================================

/// Fetch hint passed to the exercise data source
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseQuery {
    pub muscle: Option<String>,
    pub difficulty: Option<String>,
}

impl ExerciseQuery {
    pub fn muscle(muscle: impl Into<String>) -> Self {
        Self {
            muscle: Some(muscle.into()),
            difficulty: None,
        }
    }

    /// Muscle constraint, or None for a wildcard
    pub fn muscle_constraint(&self) -> Option<&str> {
        self.muscle
            .as_deref()
            .filter(|m| !crate::models::is_wildcard(m))
    }

    /// Difficulty constraint, or None for a wildcard
    pub fn difficulty_constraint(&self) -> Option<&str> {
        self.difficulty
            .as_deref()
            .filter(|d| !crate::models::is_wildcard(d))
    }
}

/// Partial filter update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterUpdate {
    pub muscle: Option<String>,
    pub difficulty: Option<String>,
}

impl FilterUpdate {
    pub fn muscle(muscle: impl Into<String>) -> Self {
        Self {
            muscle: Some(muscle.into()),
            difficulty: None,
        }
    }

    pub fn difficulty(difficulty: impl Into<String>) -> Self {
        Self {
            muscle: None,
            difficulty: Some(difficulty.into()),
        }
    }
}

/// Catalog view
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub exercises: Vec<Exercise>,
    pub filtered_exercises: Vec<Exercise>,
    pub filter: Filter,
    pub is_loading: bool,
    pub error: Option<String>,
}

// ============================================================================
// Favorites
// ============================================================================

/// Favorites view
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FavoritesSnapshot {
    pub favorites: Vec<Exercise>,
}

// ============================================================================
// Water
// ============================================================================

/// Water intake request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddIntakeRequest {
    pub amount_ml: u32,
}

/// Water goal request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetGoalRequest {
    pub goal_ml: u32,
}

/// Water tracker view with derived values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterSnapshot {
    pub goal: u32,
    pub today: WaterDay,
    /// Unclamped; the UI caps the display at 100
    pub percentage: u32,
    pub remaining: u32,
    pub goal_met: bool,
}

// ============================================================================
// Workouts
// ============================================================================

/// Partial update of a workout entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutExercisePatch {
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub duration: Option<u32>,
    pub notes: Option<String>,
}

impl WorkoutExercisePatch {
    pub fn is_empty(&self) -> bool {
        self.sets.is_none() && self.reps.is_none() && self.duration.is_none() && self.notes.is_none()
    }
}

/// Save workout request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveWorkoutRequest {
    pub name: String,
}

/// Workout builder view
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSnapshot {
    pub current_workout: Vec<WorkoutExercise>,
    pub saved_workouts: Vec<SavedWorkout>,
}

// ============================================================================
// Notifications
// ============================================================================

/// Notification payload before id, timestamp, and read flag are assigned
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub exercise_name: Option<String>,
}

impl NewNotification {
    /// Notice emitted when an exercise becomes a favorite
    pub fn favorite_added(exercise: &Exercise) -> Self {
        Self {
            kind: NotificationType::Favorite,
            title: "Added to Favorites".to_string(),
            message: format!("{} has been added to your favorites!", exercise.name),
            exercise_name: Some(exercise.name.clone()),
        }
    }
}

/// Notification center view
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsSnapshot {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

// ============================================================================
// Theme
// ============================================================================

/// Theme request and view
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSnapshot {
    pub is_dark: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_patch_only_touches_given_fields() {
        let mut user = User {
            id: 1000,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Doe".to_string(),
            token: "t".to_string(),
            phone: None,
            age: Some(30),
            weight: None,
            height: None,
        };
        let patch = ProfilePatch {
            weight: Some(61.5),
            ..Default::default()
        };
        patch.apply(&mut user);
        assert_eq!(user.weight, Some(61.5));
        assert_eq!(user.age, Some(30));
        assert_eq!(user.first_name, "Alice");
    }

    #[test]
    fn test_query_wildcards_are_not_constraints() {
        let query = ExerciseQuery {
            muscle: Some("all".to_string()),
            difficulty: Some("beginner".to_string()),
        };
        assert_eq!(query.muscle_constraint(), None);
        assert_eq!(query.difficulty_constraint(), Some("beginner"));
    }
}
