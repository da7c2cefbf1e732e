//! Company record store
//!
//! The allocator only ever needs one capability from persistence: an exact-match
//! lookup on the `subdomain` column. Claiming a name (the insert/update) belongs
//! to the caller's transaction and relies on the column's unique constraint.

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::RwLock;
use uproom_shared::{CompanyRecord, StoreError};

/// Point lookup of a company by its subdomain
#[async_trait]
pub trait SubdomainStore: Send + Sync {
    /// Find the company currently holding `subdomain`, if any
    async fn find_by_subdomain(&self, subdomain: &str)
        -> Result<Option<CompanyRecord>, StoreError>;
}

/// Postgres-backed store reading the `companies` table
#[derive(Clone)]
pub struct PgSubdomainStore {
    pool: PgPool,
}

impl PgSubdomainStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubdomainStore for PgSubdomainStore {
    async fn find_by_subdomain(
        &self,
        subdomain: &str,
    ) -> Result<Option<CompanyRecord>, StoreError> {
        let record: Option<CompanyRecord> = sqlx::query_as(
            "SELECT id, name, subdomain, created_at FROM companies WHERE subdomain = $1",
        )
        .bind(subdomain)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}

/// In-memory store keyed by subdomain, for local runs and tests
#[derive(Default)]
pub struct MemorySubdomainStore {
    records: RwLock<HashMap<String, CompanyRecord>>,
}

impl MemorySubdomainStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given records
    pub fn with_records(records: impl IntoIterator<Item = CompanyRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Insert or replace the record holding `record.subdomain`
    pub fn insert(&self, record: CompanyRecord) {
        if let Ok(mut records) = self.records.write() {
            records.insert(record.subdomain.clone(), record);
        }
    }

    pub fn remove(&self, subdomain: &str) -> Option<CompanyRecord> {
        self.records.write().ok()?.remove(subdomain)
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SubdomainStore for MemorySubdomainStore {
    async fn find_by_subdomain(
        &self,
        subdomain: &str,
    ) -> Result<Option<CompanyRecord>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Unavailable("record map lock poisoned".to_string()))?;
        Ok(records.get(subdomain).cloned())
    }
}
