use std::sync::Arc;

use log::{info, warn};
use reqwest_middleware::ClientWithMiddleware;
use serde::Serialize;
use thiserror::Error;

use crate::error::{ApiError, RefreshError};
use crate::token::store::TokenStore;

/// Why a session was ended without the caller asking for it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionEndReason {
    #[error("token refresh failed: {0}")]
    RefreshFailed(RefreshError),
    #[error("request rejected again after token refresh")]
    RetryExhausted,
}

/// Host-registered callback fired once per terminal session failure. Hosts
/// typically navigate to their login surface here.
pub trait SessionObserver: Send + Sync {
    fn session_expired(&self, reason: &SessionEndReason);
}

/// Observer for hosts that poll the token store instead of reacting.
#[derive(Debug, Default)]
pub struct NoopSessionObserver;

impl SessionObserver for NoopSessionObserver {
    fn session_expired(&self, _reason: &SessionEndReason) {}
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LogoutRequest {
    refresh_token: String,
}

/// Decides what "terminate session" means: clear the store and notify the
/// host. Stateless apart from its wiring.
#[derive(Clone)]
pub struct SessionPolicy {
    http: Arc<ClientWithMiddleware>,
    store: Arc<dyn TokenStore>,
    observer: Arc<dyn SessionObserver>,
    logout_url: String,
}

impl SessionPolicy {
    pub fn new(
        http: Arc<ClientWithMiddleware>,
        store: Arc<dyn TokenStore>,
        observer: Arc<dyn SessionObserver>,
        logout_url: String,
    ) -> Self {
        SessionPolicy {
            http,
            store,
            observer,
            logout_url,
        }
    }

    /// Terminal failure path: clear credentials, tell the host once.
    pub fn terminate(&self, reason: &SessionEndReason) {
        warn!("Terminating session: {reason}");
        self.store.clear();
        self.observer.session_expired(reason);
    }

    /// Caller-initiated logout. Revokes the refresh token on the backend
    /// when one is stored, then clears the store. With no stored tokens this
    /// is a no-op with no network call.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let Some(refresh_token) = self.store.refresh() else {
            info!("Logout requested with no stored session");
            return Ok(());
        };

        let result = self
            .http
            .post(&self.logout_url)
            .json(&LogoutRequest { refresh_token })
            .send()
            .await;
        // Local credentials go away even if revocation failed.
        self.store.clear();

        match result {
            Ok(response) if response.status().is_success() => {
                info!("Logged out");
                Ok(())
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                warn!("Logout rejected with status {status}");
                Err(ApiError::Status { status, body })
            }
            Err(e) => {
                warn!("Logout request failed: {e}");
                Err(ApiError::Transport(e))
            }
        }
    }
}
