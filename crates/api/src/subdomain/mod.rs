//! Tenant subdomain allocation
//!
//! This module decides which subdomains a company may use, enabling tenant URLs like:
//! - Production: acme.uproom.com
//! - Development: acme.localhost:3000
//!
//! The policy layer is pure; the resolver adds a single exact-match store lookup
//! per candidate.

mod policy;
mod resolver;
mod store;
mod url;

pub use policy::{
    normalize, ReservedNames, SubdomainFormatError, SubdomainPolicy, MAX_SUBDOMAIN_LEN,
    MIN_SUBDOMAIN_LEN, RESERVED_SUBDOMAINS,
};
pub use resolver::{
    SubdomainResolver, SubdomainSuggestion, DEFAULT_ALTERNATIVE_COUNT, MAX_ALTERNATIVE_COUNT,
};
pub use store::{MemorySubdomainStore, PgSubdomainStore, SubdomainStore};
pub use url::{build_url, extract_subdomain_from_host, DomainConfig};
