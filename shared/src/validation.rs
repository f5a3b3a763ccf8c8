//! Input validation functions
//!
//! Validators return a user-facing message on failure. Store code wraps the
//! message in `StoreError::Validation`.

use crate::types::{ProfilePatch, RegisterRequest, WorkoutExercisePatch};
use validator::ValidateEmail;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !email.validate_email() {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 6 {
        return Err("Password must be at least 6 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate username: 3-32 characters of letters, digits, `_`, `.` or `-`
pub fn validate_username(username: &str) -> Result<(), String> {
    let len = username.chars().count();
    if len < 3 {
        return Err("Username must be at least 3 characters".to_string());
    }
    if len > 32 {
        return Err("Username must be at most 32 characters".to_string());
    }
    let username_regex =
        regex_lite::Regex::new(r"^[A-Za-z0-9_.\-]+$").map_err(|e| e.to_string())?;
    if !username_regex.is_match(username) {
        return Err(
            "Username may only contain letters, digits, underscores, dots and dashes".to_string(),
        );
    }
    Ok(())
}

/// Validate a first or last name
pub fn validate_name(field: &str, value: &str) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{} is required", field));
    }
    if trimmed.chars().count() > 64 {
        return Err(format!("{} is too long", field));
    }
    Ok(())
}

/// Validate a single water intake amount (ml)
pub fn validate_water_amount(amount_ml: u32) -> Result<(), String> {
    if amount_ml == 0 {
        return Err("Amount must be greater than 0".to_string());
    }
    Ok(())
}

/// Validate a daily water goal (ml)
pub fn validate_water_goal(goal_ml: u32) -> Result<(), String> {
    if goal_ml == 0 {
        return Err("Daily goal must be greater than 0".to_string());
    }
    Ok(())
}

/// Validate age in years
pub fn validate_age(age: u32) -> Result<(), String> {
    if !(1..=150).contains(&age) {
        return Err("Age must be between 1 and 150".to_string());
    }
    Ok(())
}

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < 20.0 {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
/// Valid range: 50-300 cm
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate a registration request
pub fn validate_registration(req: &RegisterRequest) -> Result<(), String> {
    validate_username(&req.username)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;
    validate_name("First name", &req.first_name)?;
    validate_name("Last name", &req.last_name)?;
    Ok(())
}

/// Validate the fields present in a profile patch
pub fn validate_profile_patch(patch: &ProfilePatch) -> Result<(), String> {
    if let Some(email) = &patch.email {
        validate_email(email)?;
    }
    if let Some(first_name) = &patch.first_name {
        validate_name("First name", first_name)?;
    }
    if let Some(last_name) = &patch.last_name {
        validate_name("Last name", last_name)?;
    }
    if let Some(age) = patch.age {
        validate_age(age)?;
    }
    if let Some(weight) = patch.weight {
        validate_weight(weight)?;
    }
    if let Some(height) = patch.height {
        validate_height_cm(height)?;
    }
    Ok(())
}

/// Validate a workout entry patch
pub fn validate_workout_patch(patch: &WorkoutExercisePatch) -> Result<(), String> {
    if patch.sets == Some(0) {
        return Err("Sets must be greater than 0".to_string());
    }
    if patch.reps == Some(0) {
        return Err("Reps must be greater than 0".to_string());
    }
    Ok(())
}
