//! Common types used across Uproom

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

// =============================================================================
// ID Wrappers
// =============================================================================

/// Company (tenant) ID wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub Uuid);

impl CompanyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CompanyId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CompanyId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

// =============================================================================
// Records
// =============================================================================

/// Tenant record as read from the company store.
///
/// The subdomain column carries a uniqueness constraint; this crate only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyRecord {
    pub id: Uuid,
    pub name: String,
    pub subdomain: String,
    pub created_at: OffsetDateTime,
}

impl CompanyRecord {
    pub fn company_id(&self) -> CompanyId {
        CompanyId(self.id)
    }
}

// =============================================================================
// Subdomain Validation
// =============================================================================

pub const MSG_SUBDOMAIN_AVAILABLE: &str = "Subdomain is available";
pub const MSG_SUBDOMAIN_TAKEN: &str = "Subdomain is already taken";

/// Outcome of validating a candidate subdomain. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub is_available: bool,
    pub message: String,
}

impl ValidationResult {
    /// Candidate broke a naming rule; availability was not checked
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            is_available: false,
            message: message.into(),
        }
    }

    pub fn available() -> Self {
        Self {
            is_valid: true,
            is_available: true,
            message: MSG_SUBDOMAIN_AVAILABLE.to_string(),
        }
    }

    pub fn taken() -> Self {
        Self {
            is_valid: true,
            is_available: false,
            message: MSG_SUBDOMAIN_TAKEN.to_string(),
        }
    }

    /// Valid and free at the time of the check
    pub fn is_assignable(&self) -> bool {
        self.is_valid && self.is_available
    }
}
