use std::sync::Arc;

use auth_client::{ApiClient, ApiError};
use log::info;
use serde_json::json;

use crate::models::LoginResponse;

const GOOGLE_LOGIN: &str = "/auth/google-login";
const FACEBOOK_LOGIN: &str = "/auth/facebook-login";

/// Login and logout. Successful logins persist the issued token pair, which
/// is what arms the refresh pipeline for every other call.
#[derive(Clone)]
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        AuthApi { client }
    }

    pub async fn login_google(&self, id_token: &str) -> Result<LoginResponse, ApiError> {
        let response: LoginResponse = self
            .client
            .post_json(GOOGLE_LOGIN, &json!({ "idToken": id_token }))
            .await?;
        self.save_session(&response);
        Ok(response)
    }

    pub async fn login_facebook(&self, access_token: &str) -> Result<LoginResponse, ApiError> {
        let response: LoginResponse = self
            .client
            .post_json(FACEBOOK_LOGIN, &json!({ "accessToken": access_token }))
            .await?;
        self.save_session(&response);
        Ok(response)
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client.session().logout().await
    }

    fn save_session(&self, response: &LoginResponse) {
        self.client
            .token_store()
            .save(&response.access_token, &response.refresh_token);
        info!("Logged in as {}", response.user_dto.email);
    }
}
