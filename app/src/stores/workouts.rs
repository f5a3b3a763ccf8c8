//! Workout builder store

use crate::clock::Clock;
use crate::storage::{read_json, Persister, StorageKey, Write};
use fitbuddy_shared::state::WorkoutState;
use fitbuddy_shared::{
    Exercise, SavedWorkout, StoreResult, WorkoutExercise, WorkoutExercisePatch, WorkoutSnapshot,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use uuid::Uuid;

pub struct WorkoutStore {
    state: RwLock<WorkoutState>,
    persister: Persister,
    clock: Arc<dyn Clock>,
}

impl WorkoutStore {
    pub fn new(persister: Persister, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(WorkoutState::default()),
            persister,
            clock,
        }
    }

    #[instrument(skip(self))]
    pub async fn load(&self) -> StoreResult<()> {
        let storage = self.persister.storage().as_ref();
        let current: Vec<WorkoutExercise> =
            read_json(storage, StorageKey::Workouts).await?.unwrap_or_default();
        let saved: Vec<SavedWorkout> =
            read_json(storage, StorageKey::SavedWorkouts).await?.unwrap_or_default();

        let state = WorkoutState::hydrate(current, saved);
        debug!(current = state.current.len(), saved = state.saved.len(), "Workouts loaded");
        *self.state.write().await = state;
        Ok(())
    }

    pub async fn add_exercise(&self, exercise: Exercise) -> bool {
        let mut state = self.state.write().await;
        let added = state.add_exercise(exercise, self.clock.now());
        if added {
            self.persist_current(&state).await;
        }
        added
    }

    pub async fn remove_exercise(&self, name: &str) -> bool {
        let mut state = self.state.write().await;
        let removed = state.remove_exercise(name);
        if removed {
            self.persist_current(&state).await;
        }
        removed
    }

    pub async fn update_exercise(&self, name: &str, patch: WorkoutExercisePatch) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        let changed = state.update_exercise(name, &patch)?;
        if changed {
            self.persist_current(&state).await;
        }
        Ok(changed)
    }

    /// Save the current workout under `name` and start a new one.
    ///
    /// The saved list is written before the current workout is discarded.
    #[instrument(skip(self))]
    pub async fn save_workout(&self, name: &str) -> StoreResult<Option<SavedWorkout>> {
        let mut state = self.state.write().await;
        let mut next = state.clone();
        let Some(workout) = next.save_workout(name, Uuid::new_v4().to_string(), self.clock.now())
        else {
            return Ok(None);
        };

        self.persister
            .commit_json(StorageKey::SavedWorkouts, &next.saved)
            .await?;
        *state = next;
        self.persister.submit(Write::remove(StorageKey::Workouts)).await;
        info!(name = %workout.name, exercises = workout.exercises.len(), "Workout saved");
        Ok(Some(workout))
    }

    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.clear_current();
        self.persister.submit(Write::remove(StorageKey::Workouts)).await;
    }

    pub async fn snapshot(&self) -> WorkoutSnapshot {
        let state = self.state.read().await;
        WorkoutSnapshot {
            current_workout: state.current.clone(),
            saved_workouts: state.saved.clone(),
        }
    }

    pub(crate) async fn reset(&self) {
        *self.state.write().await = WorkoutState::default();
    }

    async fn persist_current(&self, state: &WorkoutState) {
        self.persister
            .submit_json(StorageKey::Workouts, &state.current)
            .await;
    }
}
