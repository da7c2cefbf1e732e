//! Uproom API Library
//!
//! Tenant subdomain allocation for Uproom: naming policy, availability checks
//! against the company store, fallback suggestions, and the HTTP handlers that
//! expose them.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod subdomain;

pub use config::{Config, Environment};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
pub use subdomain::{SubdomainPolicy, SubdomainResolver, SubdomainStore};
