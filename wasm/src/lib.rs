//! FitBuddy WASM helpers
//!
//! Pure presentation math for the browser build, backed by the same rules
//! the stores use.

use fitbuddy_shared::{Exercise, Filter};
use wasm_bindgen::prelude::*;

/// Progress toward the goal, rounded and unclamped
#[wasm_bindgen]
pub fn water_percentage(amount_ml: u32, goal_ml: u32) -> u32 {
    fitbuddy_shared::water_percentage(amount_ml, goal_ml)
}

/// Progress for a progress bar, capped at 100
#[wasm_bindgen]
pub fn display_percentage(amount_ml: u32, goal_ml: u32) -> u32 {
    water_percentage(amount_ml, goal_ml).min(100)
}

#[wasm_bindgen]
pub fn water_remaining(amount_ml: u32, goal_ml: u32) -> u32 {
    goal_ml.saturating_sub(amount_ml)
}

/// Whether a JSON exercise passes the muscle and difficulty filter.
/// Malformed JSON never matches.
#[wasm_bindgen]
pub fn matches_filter(exercise_json: &str, muscle: &str, difficulty: &str) -> bool {
    let Ok(exercise) = serde_json::from_str::<Exercise>(exercise_json) else {
        return false;
    };
    let filter = Filter {
        muscle: muscle.to_string(),
        difficulty: difficulty.to_string(),
    };
    filter.matches(&exercise)
}

/// Case-insensitive name or muscle search over a JSON exercise
#[wasm_bindgen]
pub fn matches_search(exercise_json: &str, query: &str) -> bool {
    serde_json::from_str::<Exercise>(exercise_json)
        .map(|exercise| fitbuddy_shared::matches_search(&exercise, query))
        .unwrap_or(false)
}
