use std::sync::Arc;

use auth_client::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};

use crate::models::Paged;

const EXERCISES: &str = "/exercises";

fn exercise_url(id: &str) -> String {
    format!("/exercises/{id}")
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub muscle_group: Option<String>,
    #[serde(default)]
    pub difficulty: Option<u32>,
    #[serde(default)]
    pub calories_per_minute: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_per_minute: Option<f64>,
}

/// Listing filters for exercises. This endpoint capitalizes its paging keys
/// (`PageIndex`/`PageSize`), unlike the dish listing.
#[derive(Debug, Clone, Default)]
pub struct ExerciseListParams {
    pub page_index: Option<u32>,
    pub page_size: Option<u32>,
    pub name: Option<String>,
    pub difficulty: Option<u32>,
    pub is_ascending: Option<bool>,
}

impl ExerciseListParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(index) = self.page_index {
            query.push(("PageIndex", index.to_string()));
        }
        if let Some(size) = self.page_size {
            query.push(("PageSize", size.to_string()));
        }
        if let Some(name) = &self.name {
            query.push(("name", name.clone()));
        }
        if let Some(difficulty) = self.difficulty {
            query.push(("difficulty", difficulty.to_string()));
        }
        if let Some(ascending) = self.is_ascending {
            query.push(("isAscending", ascending.to_string()));
        }
        query
    }
}

#[derive(Clone)]
pub struct ExercisesApi {
    client: Arc<ApiClient>,
}

impl ExercisesApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        ExercisesApi { client }
    }

    pub async fn list(&self, params: &ExerciseListParams) -> Result<Paged<Exercise>, ApiError> {
        self.client.get_json(EXERCISES, &params.to_query()).await
    }

    pub async fn create(&self, payload: &ExercisePayload) -> Result<Exercise, ApiError> {
        self.client.post_json(EXERCISES, payload).await
    }

    pub async fn update(&self, id: &str, payload: &ExercisePayload) -> Result<Exercise, ApiError> {
        self.client.put_json(&exercise_url(id), &[], payload).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&exercise_url(id)).await
    }
}
