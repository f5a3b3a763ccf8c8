//! Exercise catalog, active filter, and fetch generations

use crate::models::{Exercise, Filter};
use crate::types::{CatalogSnapshot, FilterUpdate};
use serde::{Deserialize, Serialize};

/// Result of applying a fetch response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum FetchOutcome {
    Applied { count: usize },
    /// A newer fetch started before this one finished
    Superseded,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    exercises: Vec<Exercise>,
    filtered: Vec<Exercise>,
    filter: Filter,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl CatalogState {
    /// Start a fetch and return its ticket
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.generation
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.generation
    }

    /// Apply a successful fetch. The filter is left as it was and the
    /// filtered view shows the full result.
    pub fn finish_fetch(&mut self, ticket: u64, exercises: Vec<Exercise>) -> FetchOutcome {
        if !self.is_current(ticket) {
            return FetchOutcome::Superseded;
        }
        let count = exercises.len();
        self.filtered = exercises.clone();
        self.exercises = exercises;
        self.loading = false;
        FetchOutcome::Applied { count }
    }

    /// Record a failed fetch, keeping the previous exercises
    pub fn fail_fetch(&mut self, ticket: u64, message: String) -> FetchOutcome {
        if !self.is_current(ticket) {
            return FetchOutcome::Superseded;
        }
        self.loading = false;
        self.error = Some(message);
        FetchOutcome::Applied { count: 0 }
    }

    /// Merge the given fields into the filter and recompute the filtered view
    pub fn set_filter(&mut self, update: FilterUpdate) {
        if let Some(muscle) = update.muscle {
            self.filter.muscle = muscle;
        }
        if let Some(difficulty) = update.difficulty {
            self.filter.difficulty = difficulty;
        }
        self.refilter();
    }

    pub fn clear_filters(&mut self) {
        self.filter = Filter::default();
        self.filtered = self.exercises.clone();
    }

    /// Narrow the filtered view by a name or muscle substring
    pub fn search(&self, query: &str) -> Vec<Exercise> {
        let query = query.trim();
        if query.is_empty() {
            return self.filtered.clone();
        }
        let needle = query.to_lowercase();
        self.filtered
            .iter()
            .filter(|e| matches_search(e, &needle))
            .cloned()
            .collect()
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn filtered(&self) -> &[Exercise] {
        &self.filtered
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            exercises: self.exercises.clone(),
            filtered_exercises: self.filtered.clone(),
            filter: self.filter.clone(),
            is_loading: self.loading,
            error: self.error.clone(),
        }
    }

    fn refilter(&mut self) {
        self.filtered = self
            .exercises
            .iter()
            .filter(|e| self.filter.matches(e))
            .cloned()
            .collect();
    }
}

/// Case-insensitive name or muscle substring match
pub fn matches_search(exercise: &Exercise, query: &str) -> bool {
    let needle = query.to_lowercase();
    exercise.name.to_lowercase().contains(&needle)
        || exercise.muscle.to_lowercase().contains(&needle)
}
