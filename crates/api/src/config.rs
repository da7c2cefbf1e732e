//! Application configuration

use std::env;
use std::str::FromStr;

use crate::subdomain::{
    DomainConfig, ReservedNames, DEFAULT_ALTERNATIVE_COUNT, MAX_ALTERNATIVE_COUNT,
};

/// Deployment environment, selects which domain tenant URLs use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Production,
    #[default]
    Development,
}

impl Environment {
    /// URL scheme used when `PUBLIC_PROTOCOL` is not set
    pub fn default_protocol(&self) -> &'static str {
        match self {
            Environment::Production => "https",
            Environment::Development => "http",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" | "local" => Ok(Environment::Development),
            other => Err(ConfigError::Invalid {
                var: "APP_ENV",
                reason: format!("unknown environment '{other}'"),
            }),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Environment
    pub environment: Environment,
    pub base_domain: String, // e.g., "uproom.com" for *.uproom.com tenant URLs
    pub dev_host: String,    // e.g., "localhost:3000"
    pub public_protocol: String,

    // Database
    pub database_url: String,
    pub database_max_connections: u32,

    // Subdomains
    pub subdomain_alternatives: u32,
    pub extra_reserved_subdomains: Vec<String>,
}

impl Config {
    /// Load `.env` if present, then read the environment
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "failed to read .env file");
            }
        }
        Self::from_env()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment: Environment = match env::var("APP_ENV") {
            Ok(value) => value.parse()?,
            Err(_) => Environment::default(),
        };

        let subdomain_alternatives = match env::var("SUBDOMAIN_ALTERNATIVES") {
            Ok(value) => {
                let count: u32 = value.trim().parse().map_err(|_| ConfigError::Invalid {
                    var: "SUBDOMAIN_ALTERNATIVES",
                    reason: format!("'{value}' is not a number"),
                })?;
                if count == 0 || count > MAX_ALTERNATIVE_COUNT {
                    return Err(ConfigError::Invalid {
                        var: "SUBDOMAIN_ALTERNATIVES",
                        reason: format!("must be between 1 and {MAX_ALTERNATIVE_COUNT}"),
                    });
                }
                count
            }
            Err(_) => DEFAULT_ALTERNATIVE_COUNT,
        };

        Ok(Self {
            environment,
            base_domain: env::var("BASE_DOMAIN").unwrap_or_else(|_| "uproom.com".to_string()),
            dev_host: env::var("DEV_HOST").unwrap_or_else(|_| "localhost:3000".to_string()),
            public_protocol: env::var("PUBLIC_PROTOCOL")
                .unwrap_or_else(|_| environment.default_protocol().to_string()),

            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),

            subdomain_alternatives,
            extra_reserved_subdomains: env::var("EXTRA_RESERVED_SUBDOMAINS")
                .map(|list| {
                    list.split(',')
                        .map(|s| s.trim().to_lowercase())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    /// Domains for building tenant URLs
    pub fn domain_config(&self) -> DomainConfig {
        DomainConfig {
            environment: self.environment,
            production_domain: self.base_domain.clone(),
            development_host: self.dev_host.clone(),
        }
    }

    /// Production reserved list plus any configured additions
    pub fn reserved_names(&self) -> ReservedNames {
        ReservedNames::with_extra(&self.extra_reserved_subdomains)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}
