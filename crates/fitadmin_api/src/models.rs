use serde::{Deserialize, Serialize};

/// Account profile as the backend returns it on login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub activity_level: Option<String>,
    #[serde(default)]
    pub daily_calo_goal: Option<u32>,
    #[serde(default)]
    pub current_plan_id: Option<i64>,
    #[serde(default)]
    pub current_subscription_expires_at: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub is_new_user: bool,
    pub user_dto: UserProfile,
}

/// One page of a listing endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total_count: u64,
}

/// Zero-based paging used by the dish listing.
#[derive(Debug, Clone, Default)]
pub struct PageParams {
    pub page_index: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageParams {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(index) = self.page_index {
            query.push(("pageIndex", index.to_string()));
        }
        if let Some(size) = self.page_size {
            query.push(("pageSize", size.to_string()));
        }
        query
    }
}
