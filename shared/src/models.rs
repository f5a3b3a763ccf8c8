//! Data models for the FitBuddy application
//!
//! Field names serialize in camelCase so persisted records keep the shape
//! the mobile client has always written.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Wildcard value for a filter field
pub const FILTER_ALL: &str = "all";

/// Authenticated user with session token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// Locally registered account row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl RegisteredUser {
    /// Build the session user for this account
    pub fn to_user(&self, token: String) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            token,
            phone: self.phone.clone(),
            age: self.age,
            weight: self.weight,
            height: self.height,
        }
    }

    /// Copy profile fields from a session user back into the row
    pub fn sync_profile(&mut self, user: &User) {
        self.email = user.email.clone();
        self.first_name = user.first_name.clone();
        self.last_name = user.last_name.clone();
        self.phone = user.phone.clone();
        self.age = user.age;
        self.weight = user.weight;
        self.height = user.height;
    }
}

/// Account row without credentials
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUserSummary {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&RegisteredUser> for RegisteredUserSummary {
    fn from(row: &RegisteredUser) -> Self {
        Self {
            id: row.id,
            username: row.username.clone(),
            email: row.email.clone(),
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            created_at: row.created_at,
        }
    }
}

/// Catalog exercise, identified by name
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Exercise {
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: String,
    pub muscle: String,
    pub equipment: String,
    pub difficulty: String,
    pub instructions: String,
}

/// Active catalog filter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Filter {
    pub muscle: String,
    pub difficulty: String,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            muscle: FILTER_ALL.to_string(),
            difficulty: FILTER_ALL.to_string(),
        }
    }
}

/// Returns true when a filter field places no constraint
pub fn is_wildcard(value: &str) -> bool {
    value.is_empty() || value == FILTER_ALL
}

impl Filter {
    /// Whether an exercise passes both constraints
    pub fn matches(&self, exercise: &Exercise) -> bool {
        let muscle_match = is_wildcard(&self.muscle) || exercise.muscle == self.muscle;
        let difficulty_match =
            is_wildcard(&self.difficulty) || exercise.difficulty == self.difficulty;
        muscle_match && difficulty_match
    }

    /// True when neither field constrains the catalog
    pub fn is_empty(&self) -> bool {
        is_wildcard(&self.muscle) && is_wildcard(&self.difficulty)
    }
}

/// Single water dosing event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaterEntry {
    /// Local wall-clock time, HH:MM
    pub time: String,
    pub amount: u32,
}

/// Water intake for one calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaterDay {
    pub date: NaiveDate,
    pub amount: u32,
    #[serde(default)]
    pub entries: Vec<WaterEntry>,
}

impl WaterDay {
    /// Empty day
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            amount: 0,
            entries: Vec::new(),
        }
    }

    /// Sum of all entry amounts, saturating at `u32::MAX`
    pub fn entries_total(&self) -> u32 {
        self.entries
            .iter()
            .fold(0u32, |total, e| total.saturating_add(e.amount))
    }
}

/// Exercise placed in the workout being assembled
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    #[serde(flatten)]
    pub exercise: Exercise,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    /// Duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub added_at: DateTime<Utc>,
}

impl WorkoutExercise {
    pub fn name(&self) -> &str {
        &self.exercise.name
    }
}

/// Named snapshot of a finished workout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedWorkout {
    pub id: String,
    pub name: String,
    pub exercises: Vec<WorkoutExercise>,
    pub created_at: DateTime<Utc>,
}

/// Notification category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum NotificationType {
    Favorite,
    Workout,
    Achievement,
    Generic,
}

impl From<String> for NotificationType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "favorite" => NotificationType::Favorite,
            "workout" => NotificationType::Workout,
            "achievement" => NotificationType::Achievement,
            _ => NotificationType::Generic,
        }
    }
}

/// In-app notice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_name: Option<String>,
}

/// Display mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    /// Stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Anything other than `"dark"` reads as light
    pub fn from_stored(value: &str) -> Self {
        if value == "dark" {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeMode::Dark)
    }
}
