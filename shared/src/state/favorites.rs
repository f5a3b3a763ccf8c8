//! Favorite exercises, unique by name

use crate::models::Exercise;

/// Ordered set of favorite exercises
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoriteSet {
    items: Vec<Exercise>,
}

impl FavoriteSet {
    /// Build from a persisted list, keeping the first of any duplicate names
    pub fn from_vec(list: Vec<Exercise>) -> Self {
        let mut set = Self::default();
        for exercise in list {
            set.add(exercise);
        }
        set
    }

    /// Remove the exercise if present, otherwise append it.
    /// Returns true when the exercise is a favorite afterwards.
    pub fn toggle(&mut self, exercise: Exercise) -> bool {
        if self.remove(&exercise.name) {
            false
        } else {
            self.items.push(exercise);
            true
        }
    }

    /// Append unless already present; returns true on change
    pub fn add(&mut self, exercise: Exercise) -> bool {
        if self.contains(&exercise.name) {
            return false;
        }
        self.items.push(exercise);
        true
    }

    /// Remove by name; returns true on change
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|e| e.name != name);
        self.items.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|e| e.name == name)
    }

    pub fn as_slice(&self) -> &[Exercise] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn to_vec(&self) -> Vec<Exercise> {
        self.items.clone()
    }
}
