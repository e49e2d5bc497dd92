use std::sync::{Arc, Mutex};

use log::{error, info};
use reqwest_middleware::ClientWithMiddleware;
use serde::Serialize;
use tokio::sync::oneshot;

use crate::auth::session::{SessionEndReason, SessionPolicy};
use crate::error::RefreshError;
use crate::token::store::{TokenPair, TokenStore};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest {
    access_token: String,
    refresh_token: String,
}

type RefreshOutcome = Result<String, RefreshError>;

/// Shared mutable state of the coordinator. The waiter queue is non-empty
/// only while `refreshing` is true, and is fully drained on every
/// true -> false transition.
#[derive(Default)]
struct RefreshState {
    refreshing: bool,
    waiters: Vec<oneshot::Sender<RefreshOutcome>>,
}

/// What a 401 handler becomes after checking the state: the first one in a
/// cycle leads the refresh, the rest wait for its outcome.
enum Role {
    Leader,
    Waiter(oneshot::Receiver<RefreshOutcome>),
}

/// Single-flight token refresh. The first request that sees a 401 while the
/// coordinator is idle issues exactly one call to the refresh endpoint;
/// every further 401 during that window queues behind it and is resumed
/// with the same outcome. On success the new pair is persisted and every
/// waiter receives the new access token; on failure every waiter receives
/// the refresh error, the store is cleared and the session terminated.
pub struct RefreshCoordinator {
    http: Arc<ClientWithMiddleware>,
    store: Arc<dyn TokenStore>,
    session: SessionPolicy,
    refresh_url: String,
    state: Mutex<RefreshState>,
}

impl RefreshCoordinator {
    pub fn new(
        http: Arc<ClientWithMiddleware>,
        store: Arc<dyn TokenStore>,
        session: SessionPolicy,
        refresh_url: String,
    ) -> Self {
        RefreshCoordinator {
            http,
            store,
            session,
            refresh_url,
            state: Mutex::new(RefreshState::default()),
        }
    }

    /// Entry point for a request that just got a 401. Resolves with a fresh
    /// access token to retry with, or with the error that ended the cycle.
    pub async fn access_token_after_refresh(&self) -> RefreshOutcome {
        // Check-and-set under one guard with no await inside: exactly one
        // caller per cycle can observe refreshing == false.
        let role = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            if state.refreshing {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                Role::Waiter(rx)
            } else {
                state.refreshing = true;
                Role::Leader
            }
        };

        match role {
            Role::Waiter(rx) => rx.await.unwrap_or(Err(RefreshError::Interrupted)),
            Role::Leader => self.lead_refresh_cycle().await,
        }
    }

    async fn lead_refresh_cycle(&self) -> RefreshOutcome {
        let outcome = self.call_refresh_endpoint().await;

        let waiters = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            state.refreshing = false;
            std::mem::take(&mut state.waiters)
        };
        info!(
            "Refresh cycle settled ({}), resuming {} queued request(s)",
            if outcome.is_ok() { "ok" } else { "failed" },
            waiters.len()
        );
        for waiter in waiters {
            // A waiter whose caller went away is fine to drop.
            let _ = waiter.send(outcome.clone());
        }

        if let Err(reason) = &outcome {
            self.session
                .terminate(&SessionEndReason::RefreshFailed(reason.clone()));
        }
        outcome
    }

    async fn call_refresh_endpoint(&self) -> RefreshOutcome {
        // No refresh token means no cycle: straight to termination.
        let Some(refresh_token) = self.store.refresh() else {
            return Err(RefreshError::MissingRefreshToken);
        };
        let access_token = self.store.access().unwrap_or_default();

        info!("Access token expired, refreshing session");
        let response = self
            .http
            .post(&self.refresh_url)
            .json(&RefreshRequest {
                access_token,
                refresh_token,
            })
            .send()
            .await
            .map_err(|e| {
                error!("Refresh call failed: {e}");
                RefreshError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Refresh rejected with status {status}");
            return Err(RefreshError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let pair = response
            .json::<TokenPair>()
            .await
            .map_err(|e| RefreshError::Transport(e.to_string()))?;
        self.store.save(&pair.access_token, &pair.refresh_token);
        Ok(pair.access_token)
    }
}
