//! Shared handler state

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    config::Config,
    subdomain::{
        DomainConfig, PgSubdomainStore, SubdomainPolicy, SubdomainResolver, SubdomainStore,
    },
};

/// State handed to every subdomain route
#[derive(Clone)]
pub struct AppState {
    pub resolver: SubdomainResolver,
    pub domains: DomainConfig,
    pub protocol: String,
    pub alternative_count: u32,
}

impl AppState {
    /// Wire the resolver to Postgres using the loaded configuration
    pub fn from_config(config: &Config, pool: PgPool) -> Self {
        Self::with_store(config, Arc::new(PgSubdomainStore::new(pool)))
    }

    /// Wire the resolver to any store implementation
    pub fn with_store(config: &Config, store: Arc<dyn SubdomainStore>) -> Self {
        let policy = SubdomainPolicy::new(config.reserved_names());
        Self {
            resolver: SubdomainResolver::new(policy, store),
            domains: config.domain_config(),
            protocol: config.public_protocol.clone(),
            alternative_count: config.subdomain_alternatives,
        }
    }
}
