use std::sync::Arc;

use auth_client::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};

use crate::models::Paged;

const MENUS: &str = "/menus";

fn menu_days_url(menu_id: &str) -> String {
    format!("/menus/{menu_id}/days")
}

fn menu_meals_url(menu_id: &str, day_number: u32) -> String {
    format!("/menus/{menu_id}/days/{day_number}/meals")
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub days: Vec<MenuDay>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDay {
    pub day_number: u32,
    #[serde(default)]
    pub meals: Vec<Meal>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub meal_type: String,
    #[serde(default)]
    pub is_main_meal: bool,
    #[serde(default)]
    pub dish_ids: Vec<String>,
}

/// One-based paging with optional search, matching the menu listing.
#[derive(Debug, Clone, Default)]
pub struct MenuListParams {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub search_term: Option<String>,
}

impl MenuListParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(number) = self.page_number {
            query.push(("pageNumber", number.to_string()));
        }
        if let Some(size) = self.page_size {
            query.push(("pageSize", size.to_string()));
        }
        if let Some(term) = &self.search_term {
            query.push(("searchTerm", term.clone()));
        }
        query
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenu {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewMenuDay {
    day_number: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeal {
    pub meal_type: String,
    pub is_main_meal: bool,
    pub dish_ids: Vec<String>,
}

#[derive(Clone)]
pub struct MenusApi {
    client: Arc<ApiClient>,
}

impl MenusApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        MenusApi { client }
    }

    pub async fn list(&self, params: &MenuListParams) -> Result<Paged<Menu>, ApiError> {
        self.client.get_json(MENUS, &params.to_query()).await
    }

    pub async fn create(&self, menu: &NewMenu) -> Result<Menu, ApiError> {
        self.client.post_json(MENUS, menu).await
    }

    pub async fn add_day(&self, menu_id: &str, day_number: u32) -> Result<MenuDay, ApiError> {
        self.client
            .post_json(&menu_days_url(menu_id), &NewMenuDay { day_number })
            .await
    }

    pub async fn add_meal(
        &self,
        menu_id: &str,
        day_number: u32,
        meal: &NewMeal,
    ) -> Result<Meal, ApiError> {
        self.client
            .post_json(&menu_meals_url(menu_id, day_number), meal)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_menu_urls() {
        assert_eq!(menu_days_url("m-1"), "/menus/m-1/days");
        assert_eq!(menu_meals_url("m-1", 3), "/menus/m-1/days/3/meals");
    }

    #[test]
    fn menu_list_query_matches_backend_keys() {
        let params = MenuListParams {
            page_number: Some(2),
            page_size: Some(10),
            search_term: Some("bulking".to_string()),
        };
        assert_eq!(
            params.to_query(),
            vec![
                ("pageNumber", "2".to_string()),
                ("pageSize", "10".to_string()),
                ("searchTerm", "bulking".to_string()),
            ]
        );
    }

    #[test]
    fn day_and_meal_payload_shapes() {
        let day = serde_json::to_value(NewMenuDay { day_number: 4 }).expect("serialize");
        assert_eq!(day, serde_json::json!({ "dayNumber": 4 }));

        let meal = serde_json::to_value(NewMeal {
            meal_type: "Lunch".to_string(),
            is_main_meal: true,
            dish_ids: vec!["d-1".to_string()],
        })
        .expect("serialize");
        assert_eq!(
            meal,
            serde_json::json!({
                "mealType": "Lunch",
                "isMainMeal": true,
                "dishIds": ["d-1"]
            })
        );
    }
}
