use std::sync::Arc;

use auth_client::{ApiClient, ApiError};
use serde::Deserialize;

const GET_REVENUE: &str = "/dashboard/revenue";
const GET_TRANSACTIONS: &str = "/dashboard/transactions";
const GET_USER_DEMOGRAPHICS: &str = "/dashboard/user-demographics";
const GET_APP_REVIEW_STATS: &str = "/dashboard/app-review-stats";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenuePoint {
    pub month: u32,
    pub revenue: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPoint {
    pub month: u32,
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDemographics {
    #[serde(default)]
    pub male_count: u64,
    #[serde(default)]
    pub female_count: u64,
    #[serde(default)]
    pub other_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppReviewStats {
    pub average_rating: f64,
    pub review_count: u64,
}

fn year_query(year: Option<u32>) -> Vec<(&'static str, String)> {
    year.map(|y| vec![("year", y.to_string())]).unwrap_or_default()
}

#[derive(Clone)]
pub struct DashboardApi {
    client: Arc<ApiClient>,
}

impl DashboardApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        DashboardApi { client }
    }

    pub async fn revenue_report(&self, year: Option<u32>) -> Result<Vec<RevenuePoint>, ApiError> {
        self.client.get_json(GET_REVENUE, &year_query(year)).await
    }

    pub async fn transaction_report(
        &self,
        year: Option<u32>,
    ) -> Result<Vec<TransactionPoint>, ApiError> {
        self.client
            .get_json(GET_TRANSACTIONS, &year_query(year))
            .await
    }

    pub async fn user_demographics(&self) -> Result<UserDemographics, ApiError> {
        self.client.get_json(GET_USER_DEMOGRAPHICS, &[]).await
    }

    pub async fn app_review_stats(&self) -> Result<AppReviewStats, ApiError> {
        self.client.get_json(GET_APP_REVIEW_STATS, &[]).await
    }
}
