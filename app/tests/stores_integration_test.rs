//! End-to-end store flows through the HTTP bridge

mod common;

use axum::http::StatusCode;
use chrono::Duration;
use common::{json, TestApp};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use fitbuddy_app::storage::{KeyValueStore, StorageKey};
use serde_json::json;

fn registration() -> serde_json::Value {
    let first: String = FirstName().fake();
    let last: String = LastName().fake();
    let email: String = SafeEmail().fake();
    json!({
        "username": format!("user_{}", &uuid::Uuid::new_v4().simple().to_string()[..8]),
        "email": email,
        "password": "secret123",
        "firstName": first,
        "lastName": last,
    })
}

#[tokio::test]
async fn test_water_intake_and_undo() {
    let app = TestApp::new().await;

    let (status, _) = app.post("/api/v1/water/intake", r#"{"amount_ml":250}"#).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app.post("/api/v1/water/intake", r#"{"amount_ml":500}"#).await;
    assert_eq!(status, StatusCode::OK);
    let water = json(&body);
    assert_eq!(water["today"]["amount"], 750);
    assert_eq!(water["percentage"], 38);

    let (status, body) = app.post("/api/v1/water/undo", "{}").await;
    assert_eq!(status, StatusCode::OK);
    let undo = json(&body);
    assert_eq!(undo["undone"]["amount"], 500);
    assert_eq!(undo["water"]["today"]["amount"], 250);
    assert_eq!(undo["water"]["today"]["entries"].as_array().unwrap().len(), 1);
    assert_eq!(undo["water"]["percentage"], 13);
    assert_eq!(undo["water"]["remaining"], 1750);
}

#[tokio::test]
async fn test_water_rolls_over_at_midnight() {
    let app = TestApp::new().await;
    app.post("/api/v1/water/intake", r#"{"amount_ml":400}"#).await;

    app.clock.advance(Duration::days(1));
    let (_, body) = app.get("/api/v1/water").await;
    let water = json(&body);
    assert_eq!(water["today"]["date"], "2026-03-02");
    assert_eq!(water["today"]["amount"], 0);
}

#[tokio::test]
async fn test_zero_water_amount_is_rejected() {
    let app = TestApp::new().await;
    let (status, body) = app.post("/api/v1/water/intake", r#"{"amount_ml":0}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_login_and_persist_session() {
    let app = TestApp::new().await;
    let reg = registration();

    let (status, body) = app.post("/api/v1/auth/register", &reg.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);
    let session = json(&body);
    assert_eq!(session["isAuthenticated"], true);
    assert_eq!(session["user"]["id"], 1000);

    let token = app.storage.get(StorageKey::UserToken.as_str()).await.unwrap();
    assert!(token.is_some());

    app.post("/api/v1/auth/logout", "{}").await;
    assert!(app.storage.get(StorageKey::UserToken.as_str()).await.unwrap().is_none());

    let login = json!({
        "username": reg["username"].as_str().unwrap().to_uppercase(),
        "password": "secret123",
    });
    let (status, body) = app.post("/api/v1/auth/login", &login.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["user"]["email"], reg["email"]);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = TestApp::new().await;
    let reg = registration();
    app.post("/api/v1/auth/register", &reg.to_string()).await;

    let mut again = registration();
    again["username"] = reg["username"].clone();
    let (status, body) = app.post("/api/v1/auth/register", &again.to_string()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json(&body)["error"]["code"], "DUPLICATE_USERNAME");

    let (_, body) = app.get("/api/v1/auth/session").await;
    assert!(json(&body)["error"]
        .as_str()
        .unwrap()
        .contains("Username already taken"));
}

#[tokio::test]
async fn test_unknown_login_is_unauthorized() {
    let app = TestApp::new().await;
    let (status, body) = app
        .post("/api/v1/auth/login", r#"{"username":"ghost","password":"boo12345"}"#)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json(&body)["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_profile_update_requires_session() {
    let app = TestApp::new().await;
    let (status, _) = app.put("/api/v1/auth/profile", r#"{"age":30}"#).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    app.post("/api/v1/auth/register", &registration().to_string()).await;
    let (status, body) = app.put("/api/v1/auth/profile", r#"{"age":30}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["age"], 30);
}

#[tokio::test]
async fn test_catalog_fetch_then_filter() {
    let app = TestApp::new().await;

    let (status, body) = app.post("/api/v1/exercises/fetch", "{}").await;
    assert_eq!(status, StatusCode::OK);
    let fetched = json(&body);
    assert_eq!(fetched["outcome"]["status"], "applied");
    assert_eq!(fetched["outcome"]["count"], 38);

    let (_, body) = app.put("/api/v1/exercises/filter", r#"{"muscle":"chest"}"#).await;
    let catalog = json(&body);
    assert_eq!(catalog["filteredExercises"].as_array().unwrap().len(), 4);
    assert_eq!(catalog["exercises"].as_array().unwrap().len(), 38);

    let (_, body) = app.delete("/api/v1/exercises/filter").await;
    assert_eq!(json(&body)["filteredExercises"].as_array().unwrap().len(), 38);
}

#[tokio::test]
async fn test_favorite_toggle_posts_notification() {
    let app = TestApp::new().await;
    let plank = json!({"name": "Plank", "type": "strength", "muscle": "abdominals"});

    let (_, body) = app.post("/api/v1/favorites/toggle", &plank.to_string()).await;
    assert_eq!(json(&body)["isFavorite"], true);

    let (_, body) = app.get("/api/v1/notifications").await;
    let notices = json(&body);
    assert_eq!(notices["unreadCount"], 1);
    let id = notices["notifications"][0]["id"].as_str().unwrap().to_string();

    let (status, body) = app.post(&format!("/api/v1/notifications/{}/read", id), "{}").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["unreadCount"], 0);

    let (_, body) = app.post("/api/v1/favorites/toggle", &plank.to_string()).await;
    assert_eq!(json(&body)["isFavorite"], false);
    let (_, body) = app.get("/api/v1/notifications").await;
    assert_eq!(json(&body)["notifications"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_notification_is_not_found() {
    let app = TestApp::new().await;
    let (status, _) = app.delete("/api/v1/notifications/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_build_and_save_workout() {
    let app = TestApp::new().await;
    let squats = json!({"name": "Squats", "type": "strength", "muscle": "quadriceps"});

    let (_, body) = app.post("/api/v1/workouts/exercises", &squats.to_string()).await;
    assert_eq!(json(&body)["changed"], true);
    let (_, body) = app.post("/api/v1/workouts/exercises", &squats.to_string()).await;
    assert_eq!(json(&body)["changed"], false);

    let (status, body) = app
        .patch("/api/v1/workouts/exercises/Squats", r#"{"sets":5}"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["workout"]["currentWorkout"][0]["sets"], 5);

    let (status, body) = app.post("/api/v1/workouts/save", r#"{"name":"  "}"#).await;
    assert_eq!(status, StatusCode::CREATED);
    let saved = json(&body);
    assert_eq!(saved["saved"]["name"], "Workout 1");
    assert!(saved["workout"]["currentWorkout"].as_array().unwrap().is_empty());

    let (status, _) = app.post("/api/v1/workouts/save", r#"{"name":"Legs"}"#).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_patch_missing_workout_entry_is_not_found() {
    let app = TestApp::new().await;
    let (status, _) = app
        .patch("/api/v1/workouts/exercises/Nope", r#"{"reps":8}"#)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_state_survives_relaunch() {
    let app = TestApp::new().await;
    app.post("/api/v1/theme/toggle", "{}").await;
    app.put("/api/v1/water/goal", r#"{"goal_ml":2500}"#).await;
    app.post(
        "/api/v1/favorites/toggle",
        r#"{"name":"Plank","muscle":"abdominals"}"#,
    )
    .await;

    let relaunched = TestApp::with_storage(app.storage.clone(), app.clock.clone()).await;
    let (_, body) = relaunched.get("/api/v1/theme").await;
    assert_eq!(json(&body)["isDark"], true);
    let (_, body) = relaunched.get("/api/v1/water").await;
    assert_eq!(json(&body)["goal"], 2500);
    let (_, body) = relaunched.get("/api/v1/favorites").await;
    assert_eq!(json(&body)["favorites"][0]["name"], "Plank");
    let (_, body) = relaunched.get("/api/v1/notifications").await;
    assert_eq!(json(&body)["unreadCount"], 1);
}

#[tokio::test]
async fn test_reset_clears_everything() {
    let app = TestApp::new().await;
    app.post("/api/v1/auth/register", &registration().to_string()).await;
    app.post("/api/v1/water/intake", r#"{"amount_ml":300}"#).await;

    let (status, _) = app.post("/api/v1/reset", "{}").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(app.storage.is_empty().await);

    let (_, body) = app.get("/api/v1/auth/session").await;
    assert_eq!(json(&body)["isAuthenticated"], false);
    let (_, body) = app.get("/api/v1/auth/accounts").await;
    assert!(json(&body).as_array().unwrap().is_empty());
}
