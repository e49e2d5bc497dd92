//! auth_client - Authenticated HTTP client with transparent token refresh
//!
//! This crate wraps a reqwest-middleware client with the authentication
//! plumbing the fitness admin backend expects:
//! - `token` - TokenStore trait plus in-memory and file-backed stores
//! - `api` - ApiClient, the request pipeline that attaches bearer tokens
//! - `auth` - RefreshCoordinator (single-flight refresh) and SessionPolicy
//! - `config` - config.toml / environment configuration
//!
//! A 401 on a request triggers exactly one refresh call no matter how many
//! requests fail concurrently; each failed request is retried once with the
//! new access token. A failed refresh clears the store and notifies the
//! host through its registered `SessionObserver`.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod token;

// Re-export commonly used types
pub use api::client::ApiClient;
pub use auth::refresh::RefreshCoordinator;
pub use auth::session::{NoopSessionObserver, SessionEndReason, SessionObserver, SessionPolicy};
pub use config::Config;
pub use error::{ApiError, RefreshError};
pub use token::store::{FileTokenStore, MemoryTokenStore, TokenPair, TokenStore};
