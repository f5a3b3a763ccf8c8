//! api-ninjas exercise API client

use super::{ExerciseSource, SourceError, SourceResult};
use crate::config::ExerciseApiConfig;
use async_trait::async_trait;
use fitbuddy_shared::{Exercise, ExerciseQuery};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

pub struct ApiNinjasSource {
    client: reqwest::Client,
    base_url: String,
    api_key: Secret<String>,
    muscle_groups: Vec<String>,
    per_group_limit: usize,
}

impl ApiNinjasSource {
    pub fn new(config: &ExerciseApiConfig, api_key: String) -> SourceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SourceError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: Secret::new(api_key),
            muscle_groups: config.muscle_groups.clone(),
            per_group_limit: config.per_group_limit,
        })
    }

    async fn fetch(&self, muscle: Option<&str>, difficulty: Option<&str>) -> SourceResult<Vec<Exercise>> {
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(muscle) = muscle {
            params.push(("muscle", muscle));
        }
        if let Some(difficulty) = difficulty {
            params.push(("difficulty", difficulty));
        }

        let response = self
            .client
            .get(format!("{}/exercises", self.base_url))
            .header("X-Api-Key", self.api_key.expose_secret())
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
                warn!(status = %status, "Exercise API rejected the configured key");
            }
            return Err(SourceError::Status(status.as_u16()));
        }

        response
            .json::<Vec<Exercise>>()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))
    }

    /// One request per configured muscle group, keeping the first few of each.
    /// Failing groups are skipped; the call fails only if every group fails.
    async fn fetch_all_groups(&self, difficulty: Option<&str>) -> SourceResult<Vec<Exercise>> {
        let mut all = Vec::new();
        let mut last_error = None;
        let mut succeeded = 0usize;

        for group in &self.muscle_groups {
            match self.fetch(Some(group), difficulty).await {
                Ok(exercises) => {
                    succeeded += 1;
                    all.extend(exercises.into_iter().take(self.per_group_limit));
                }
                Err(e) => {
                    warn!(muscle = %group, error = %e, "Skipping muscle group");
                    last_error = Some(e);
                }
            }
        }

        if succeeded == 0 {
            if let Some(e) = last_error {
                return Err(e);
            }
        }
        info!(count = all.len(), groups = succeeded, "Fetched exercises from muscle groups");
        Ok(all)
    }
}

#[async_trait]
impl ExerciseSource for ApiNinjasSource {
    #[instrument(skip(self))]
    async fn get_exercises(&self, query: &ExerciseQuery) -> SourceResult<Vec<Exercise>> {
        let difficulty = query.difficulty_constraint();
        match query.muscle_constraint() {
            None => self.fetch_all_groups(difficulty).await,
            Some(muscle) => {
                let exercises = self.fetch(Some(muscle), difficulty).await?;
                debug!(count = exercises.len(), "Exercise API response received");
                Ok(exercises)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn exercise_json(name: &str, muscle: &str) -> serde_json::Value {
        serde_json::json!({
            "name": name,
            "type": "strength",
            "muscle": muscle,
            "equipment": "dumbbell",
            "difficulty": "beginner",
            "instructions": "Lift."
        })
    }

    fn source(server: &MockServer, groups: &[&str]) -> ApiNinjasSource {
        let mut config = AppConfig::default().exercise_api;
        config.base_url = server.uri();
        config.per_group_limit = 2;
        config.muscle_groups = groups.iter().map(|g| g.to_string()).collect();
        ApiNinjasSource::new(&config, "test-key".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_single_muscle_sends_key_and_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/exercises"))
            .and(header("X-Api-Key", "test-key"))
            .and(query_param("muscle", "biceps"))
            .and(query_param("difficulty", "beginner"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(vec![exercise_json("Curl", "biceps")]),
            )
            .expect(1)
            .mount(&server)
            .await;

        let query = ExerciseQuery {
            muscle: Some("biceps".to_string()),
            difficulty: Some("beginner".to_string()),
        };
        let exercises = source(&server, &["biceps"]).get_exercises(&query).await.unwrap();
        assert_eq!(exercises.len(), 1);
        assert_eq!(exercises[0].exercise_type, "strength");
    }

    #[tokio::test]
    async fn test_wildcard_fans_out_and_skips_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("muscle", "chest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec![
                exercise_json("A", "chest"),
                exercise_json("B", "chest"),
                exercise_json("C", "chest"),
            ]))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("muscle", "lats"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let exercises = source(&server, &["chest", "lats"])
            .get_exercises(&ExerciseQuery::muscle("all"))
            .await
            .unwrap();
        assert_eq!(exercises.len(), 2);
    }

    #[tokio::test]
    async fn test_all_groups_failing_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let result = source(&server, &["chest", "lats"])
            .get_exercises(&ExerciseQuery::default())
            .await;
        assert!(matches!(result, Err(SourceError::Status(403))));
    }
}
