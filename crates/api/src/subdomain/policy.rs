//! Subdomain naming policy
//!
//! Pure rules deciding whether a string may be used as a tenant subdomain:
//! length, character set, hyphen placement and the reserved-name list.

use std::collections::HashSet;

/// Minimum subdomain length (characters)
pub const MIN_SUBDOMAIN_LEN: usize = 3;

/// Maximum subdomain length (characters)
pub const MAX_SUBDOMAIN_LEN: usize = 30;

/// Subdomains that can never be assigned to a company
pub const RESERVED_SUBDOMAINS: &[&str] = &[
    "api",
    "www",
    "admin",
    "app",
    "auth",
    "mail",
    "smtp",
    "ftp",
    "dashboard",
    "console",
    "portal",
    "docs",
    "help",
    "support",
    "status",
    "blog",
    "cdn",
    "static",
    "assets",
    "media",
    "images",
    "socket",
    "realtime",
    "billing",
    "staging",
    "dev",
    "test",
    "demo",
    "localhost",
    "uproom",
];

/// Reasons a candidate is rejected, in evaluation order.
///
/// `Display` yields the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubdomainFormatError {
    #[error("Subdomain must be at least 3 characters")]
    TooShort,
    #[error("Subdomain must be at most 30 characters")]
    TooLong,
    #[error("Subdomain can only contain lowercase letters, numbers, and hyphens")]
    InvalidCharacters,
    #[error("Subdomain cannot start or end with a hyphen")]
    EdgeHyphen,
    #[error("Subdomain cannot contain consecutive hyphens")]
    ConsecutiveHyphens,
    #[error("This subdomain is reserved")]
    Reserved,
}

/// Immutable set of reserved names
#[derive(Debug, Clone)]
pub struct ReservedNames {
    names: HashSet<String>,
}

impl Default for ReservedNames {
    fn default() -> Self {
        Self::new(RESERVED_SUBDOMAINS.iter().copied())
    }
}

impl ReservedNames {
    /// Build a set from an explicit list (lowercased)
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    /// The production list plus additional names
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut reserved = Self::default();
        reserved.names.extend(
            extra
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .filter(|n| !n.is_empty()),
        );
        reserved
    }

    pub fn contains(&self, subdomain: &str) -> bool {
        self.names.contains(subdomain)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Format and reservation rules for tenant subdomains
#[derive(Debug, Clone, Default)]
pub struct SubdomainPolicy {
    reserved: ReservedNames,
}

impl SubdomainPolicy {
    pub fn new(reserved: ReservedNames) -> Self {
        Self { reserved }
    }

    pub fn reserved(&self) -> &ReservedNames {
        &self.reserved
    }

    /// Check a candidate against every naming rule. The first failing rule wins.
    pub fn validate_format(&self, candidate: &str) -> Result<(), SubdomainFormatError> {
        let len = candidate.chars().count();

        if len < MIN_SUBDOMAIN_LEN {
            return Err(SubdomainFormatError::TooShort);
        }

        if len > MAX_SUBDOMAIN_LEN {
            return Err(SubdomainFormatError::TooLong);
        }

        if !candidate
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(SubdomainFormatError::InvalidCharacters);
        }

        if candidate.starts_with('-') || candidate.ends_with('-') {
            return Err(SubdomainFormatError::EdgeHyphen);
        }

        if candidate.contains("--") {
            return Err(SubdomainFormatError::ConsecutiveHyphens);
        }

        if self.reserved.contains(candidate) {
            return Err(SubdomainFormatError::Reserved);
        }

        Ok(())
    }
}

/// Derive a subdomain candidate from a free-text display name.
///
/// Lowercases, maps everything outside `[a-z0-9]` to `-`, collapses hyphen runs,
/// trims edge hyphens, then truncates to [`MAX_SUBDOMAIN_LEN`]. The result is not
/// guaranteed to pass [`SubdomainPolicy::validate_format`].
pub fn normalize(display_name: &str) -> String {
    let mut out = String::with_capacity(display_name.len());

    for c in display_name.to_lowercase().chars() {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() {
            c
        } else {
            '-'
        };
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }

    out.trim_matches('-').chars().take(MAX_SUBDOMAIN_LEN).collect()
}
