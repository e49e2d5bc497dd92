//! fitadmin_api - Typed endpoint wrappers for the fitness admin backend
//!
//! Thin feature modules over `auth_client::ApiClient`, one per backend
//! resource:
//! - `auth` - Google/Facebook login and logout
//! - `users`, `dishes`, `exercises`, `menus` - resource CRUD
//! - `dashboard` - report endpoints
//!
//! Token refresh, retry and session termination are handled underneath by
//! `auth_client`; these wrappers only know URLs and payload shapes.

pub mod auth;
pub mod client;
pub mod dashboard;
pub mod dishes;
pub mod exercises;
pub mod menus;
pub mod models;
pub mod users;

pub use auth_client::{ApiError, Config, SessionObserver, TokenStore};
pub use client::FitAdminClient;
pub use models::{LoginResponse, PageParams, Paged, UserProfile};
