//! Workout builder: the workout in progress plus saved workouts

use crate::errors::{StoreError, StoreResult};
use crate::models::{Exercise, SavedWorkout, WorkoutExercise};
use crate::types::WorkoutExercisePatch;
use crate::validation::validate_workout_patch;
use chrono::{DateTime, Utc};

pub const DEFAULT_SETS: u32 = 3;
pub const DEFAULT_REPS: u32 = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutState {
    pub current: Vec<WorkoutExercise>,
    pub saved: Vec<SavedWorkout>,
}

impl WorkoutState {
    /// Rebuild from persisted lists, dropping duplicate names from the current workout
    pub fn hydrate(current: Vec<WorkoutExercise>, saved: Vec<SavedWorkout>) -> Self {
        let mut deduped: Vec<WorkoutExercise> = Vec::with_capacity(current.len());
        for entry in current {
            if !deduped.iter().any(|e| e.name() == entry.name()) {
                deduped.push(entry);
            }
        }
        Self {
            current: deduped,
            saved,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.current.iter().any(|e| e.name() == name)
    }

    /// Append with default sets and reps; returns false if already present
    pub fn add_exercise(&mut self, exercise: Exercise, now: DateTime<Utc>) -> bool {
        if self.contains(&exercise.name) {
            return false;
        }
        self.current.push(WorkoutExercise {
            exercise,
            sets: Some(DEFAULT_SETS),
            reps: Some(DEFAULT_REPS),
            duration: None,
            notes: None,
            added_at: now,
        });
        true
    }

    pub fn remove_exercise(&mut self, name: &str) -> bool {
        let before = self.current.len();
        self.current.retain(|e| e.name() != name);
        self.current.len() != before
    }

    /// Merge a patch into the named entry; returns true if the entry changed
    pub fn update_exercise(&mut self, name: &str, patch: &WorkoutExercisePatch) -> StoreResult<bool> {
        validate_workout_patch(patch).map_err(StoreError::Validation)?;
        let Some(entry) = self.current.iter_mut().find(|e| e.name() == name) else {
            return Ok(false);
        };

        let before = entry.clone();
        if let Some(sets) = patch.sets {
            entry.sets = Some(sets);
        }
        if let Some(reps) = patch.reps {
            entry.reps = Some(reps);
        }
        if let Some(duration) = patch.duration {
            entry.duration = Some(duration);
        }
        if let Some(notes) = &patch.notes {
            entry.notes = Some(notes.clone());
        }
        Ok(*entry != before)
    }

    /// Snapshot the current workout under `name` and empty it.
    ///
    /// Returns None when there is nothing to save.
    pub fn save_workout(&mut self, name: &str, id: String, now: DateTime<Utc>) -> Option<SavedWorkout> {
        if self.current.is_empty() {
            return None;
        }
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            format!("Workout {}", self.saved.len() + 1)
        } else {
            trimmed.to_string()
        };

        let workout = SavedWorkout {
            id,
            name,
            exercises: std::mem::take(&mut self.current),
            created_at: now,
        };
        self.saved.push(workout.clone());
        Some(workout)
    }

    /// Empty the current workout; returns true if it had entries
    pub fn clear_current(&mut self) -> bool {
        let changed = !self.current.is_empty();
        self.current.clear();
        changed
    }
}
