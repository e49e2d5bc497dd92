use std::sync::Arc;

use auth_client::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};

use crate::models::{PageParams, Paged};

const DISHES: &str = "/dishes";

fn dish_url(id: &str) -> String {
    format!("/dishes/{id}")
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub calories: Option<u32>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub carbs: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DishPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub calories: u32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Clone)]
pub struct DishesApi {
    client: Arc<ApiClient>,
}

impl DishesApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        DishesApi { client }
    }

    pub async fn list(&self, params: &PageParams) -> Result<Paged<Dish>, ApiError> {
        self.client.get_json(DISHES, &params.to_query()).await
    }

    pub async fn create(&self, payload: &DishPayload) -> Result<Dish, ApiError> {
        self.client.post_json(DISHES, payload).await
    }

    /// The backend takes the target id as a query parameter on update.
    pub async fn update(&self, id: &str, payload: &DishPayload) -> Result<Dish, ApiError> {
        self.client
            .put_json(DISHES, &[("Id", id.to_string())], payload)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&dish_url(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dish_payload_skips_absent_optionals() {
        let payload = DishPayload {
            name: "Grilled chicken".to_string(),
            description: None,
            calories: 320,
            protein: 38.0,
            carbs: 2.0,
            fat: 16.0,
            image_url: None,
        };
        let json = serde_json::to_value(&payload).expect("serialize");
        assert!(json.get("description").is_none());
        assert_eq!(json["calories"], 320);
    }
}
