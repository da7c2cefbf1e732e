//! Tenant URL helpers
//!
//! Formatting only: nothing here validates the subdomain it is handed.

use crate::config::Environment;

/// Where tenant subdomains live for the running environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainConfig {
    pub environment: Environment,
    /// e.g. "uproom.com"
    pub production_domain: String,
    /// e.g. "localhost:3000"
    pub development_host: String,
}

impl DomainConfig {
    /// Domain tenant subdomains are attached to
    pub fn domain(&self) -> &str {
        match self.environment {
            Environment::Production => &self.production_domain,
            Environment::Development => &self.development_host,
        }
    }
}

/// `protocol://subdomain.domain`
pub fn build_url(subdomain: &str, protocol: &str, domains: &DomainConfig) -> String {
    format!("{}://{}.{}", protocol, subdomain, domains.domain())
}

/// Hosts that never carry a tenant label
const LOOPBACK_HOSTS: &[&str] = &["localhost", "127.0.0.1"];

/// Tenant label of a `Host` value, e.g. `acme` for `acme.uproom.com`.
///
/// Requires at least three dot-separated parts; loopback hosts yield `None`.
pub fn extract_subdomain_from_host(host: &str) -> Option<String> {
    let host = normalize_host(host);

    if LOOPBACK_HOSTS.contains(&host.as_str()) {
        return None;
    }

    let parts: Vec<&str> = host.split('.').collect();
    if parts.len() < 3 {
        return None;
    }

    parts
        .first()
        .filter(|label| !label.is_empty())
        .map(|label| label.to_string())
}

/// Strip any port and lowercase
fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = host.split(':').next().unwrap_or(host);
    host.to_lowercase()
}
