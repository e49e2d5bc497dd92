use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use log::{debug, warn};
use reqwest::header::HeaderMap;
use reqwest::{Client, Response, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::refresh::RefreshCoordinator;
use crate::auth::session::{SessionEndReason, SessionObserver, SessionPolicy};
use crate::config::Config;
use crate::error::ApiError;
use crate::token::store::TokenStore;

/// The request pipeline: attaches the stored bearer token to every outbound
/// call, hands 401s to the RefreshCoordinator and retries the original
/// request once with the refreshed token. Every other failure passes
/// through untouched. Transient 5xx and connection errors are retried by
/// the reqwest-retry middleware underneath.
pub struct ApiClient {
    http: Arc<ClientWithMiddleware>,
    store: Arc<dyn TokenStore>,
    refresher: RefreshCoordinator,
    session: SessionPolicy,
    base_url: String,
}

impl ApiClient {
    pub fn new(
        config: &Config,
        store: Arc<dyn TokenStore>,
        observer: Arc<dyn SessionObserver>,
    ) -> anyhow::Result<Self> {
        let client = Self::build_http_client(config)?;
        let shared_client = Arc::new(Self::build_retry_client(client));
        let base_url = config.api_base.trim_end_matches('/').to_string();

        let session = SessionPolicy::new(
            Arc::clone(&shared_client),
            Arc::clone(&store),
            observer,
            format!("{base_url}/auth/logout"),
        );
        let refresher = RefreshCoordinator::new(
            Arc::clone(&shared_client),
            Arc::clone(&store),
            session.clone(),
            format!("{base_url}/auth/refresh"),
        );

        Ok(ApiClient {
            http: shared_client,
            store,
            refresher,
            session,
            base_url,
        })
    }

    fn build_http_client(config: &Config) -> anyhow::Result<Client> {
        Client::builder()
            .default_headers(Self::default_headers())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {e}"))
    }

    fn build_retry_client(client: Client) -> ClientWithMiddleware {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);
        ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build()
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("accept", "application/json".parse().expect("header"));
        headers.insert("content-type", "application/json".parse().expect("header"));
        headers
    }

    pub fn session(&self) -> &SessionPolicy {
        &self.session
    }

    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("[GET] {url}");
        let response = self
            .execute(|http| http.get(&url).query(query))
            .await?;
        Ok(response.json().await?)
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("[POST] {url}");
        let response = self.execute(|http| http.post(&url).json(body)).await?;
        Ok(response.json().await?)
    }

    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("[PUT] {url}");
        let response = self
            .execute(|http| http.put(&url).query(query).json(body))
            .await?;
        Ok(response.json().await?)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        debug!("[DELETE] {url}");
        self.execute(|http| http.delete(&url)).await?;
        Ok(())
    }

    /// Send, and on a 401 refresh-then-retry exactly once. The builder
    /// closure is re-invoked for the retry because a sent request cannot be
    /// reused.
    async fn execute<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn(&ClientWithMiddleware) -> RequestBuilder,
    {
        let response = self.send_with_token(&build, self.store.access()).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::check_status(response).await;
        }

        debug!("401 received, entering refresh flow");
        let fresh_token = self.refresher.access_token_after_refresh().await?;

        let retried = self.send_with_token(&build, Some(fresh_token)).await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            // Second 401 on a retried request: never re-queue, cap at one
            // retry per logical request.
            warn!("Request rejected again after refresh, terminating session");
            self.session.terminate(&SessionEndReason::RetryExhausted);
            return Err(ApiError::RetryExhausted);
        }
        Self::check_status(retried).await
    }

    async fn send_with_token<F>(
        &self,
        build: &F,
        token: Option<String>,
    ) -> Result<Response, ApiError>
    where
        F: Fn(&ClientWithMiddleware) -> RequestBuilder,
    {
        let mut request = build(&self.http);
        // Requests with no stored token go out unauthenticated; the server
        // answers with a 401 if the endpoint requires one.
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        Ok(request.send().await?)
    }

    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!("Request failed with status {status}");
        Err(ApiError::Status { status, body })
    }
}
