use thiserror::Error;

/// Terminal reasons a refresh cycle can fail. Clone so the one in-flight
/// failure can be handed to every queued waiter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshError {
    #[error("no refresh token in store")]
    MissingRefreshToken,
    #[error("refresh rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("refresh transport failure: {0}")]
    Transport(String),
    #[error("refresh cycle ended without a result")]
    Interrupted,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure on an ordinary request. Passed through to the
    /// caller untouched; never triggers the refresh machinery.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// Non-2xx, non-401 response from the backend.
    #[error("request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("response decode error: {0}")]
    Decode(#[from] reqwest::Error),

    /// The refresh cycle this request depended on failed. Terminal; the
    /// session has already been cleared by the time the caller sees this.
    #[error("token refresh failed: {0}")]
    RefreshFailed(#[from] RefreshError),

    /// The request was retried with a freshly refreshed token and still got
    /// a 401. Terminal, handled like a refresh failure.
    #[error("request rejected again after token refresh")]
    RetryExhausted,
}
