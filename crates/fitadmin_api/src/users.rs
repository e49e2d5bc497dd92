use std::sync::Arc;

use auth_client::{ApiClient, ApiError};
use serde::Deserialize;

use crate::models::Paged;

const GET_USERS: &str = "/users";

fn user_url(id: &str) -> String {
    format!("/users/{id}")
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// One-based paging with optional search, as the user listing expects.
#[derive(Debug, Clone, Default)]
pub struct UserListParams {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub search_term: Option<String>,
}

impl UserListParams {
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

#[derive(Clone)]
pub struct UsersApi {
    client: Arc<ApiClient>,
}

impl UsersApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        UsersApi { client }
    }

    pub async fn list(&self, params: &UserListParams) -> Result<Paged<UserSummary>, ApiError> {
        self.client.get_json(GET_USERS, &params.to_query()).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&user_url(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_list_query_includes_search_term() {
        let params = UserListParams {
            page_number: Some(1),
            page_size: Some(10),
            search_term: Some("an@".to_string()),
        };
        assert_eq!(
            params.to_query(),
            vec![
                ("pageNumber", "1".to_string()),
                ("pageSize", "10".to_string()),
                ("searchTerm", "an@".to_string()),
            ]
        );
    }

    #[test]
    fn user_url_embeds_id() {
        assert_eq!(user_url("u-42"), "/users/u-42");
    }
}
