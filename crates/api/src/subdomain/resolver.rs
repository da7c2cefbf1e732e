//! Subdomain availability resolution
//!
//! Combines the naming policy with a store lookup, and searches for numbered
//! fallbacks (`acme-1`, `acme-2`, ...) when a preferred name is taken.
//!
//! Results are advisory: nothing is reserved by a successful check. Callers
//! claim a name inside their own write and must handle a unique-constraint
//! conflict by retrying with an alternative.

use futures::stream::{self, Stream, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use uproom_shared::{CompanyId, ValidationResult};

use super::policy::{normalize, SubdomainPolicy};
use super::store::SubdomainStore;

/// Alternatives tried when the caller does not ask for a specific number
pub const DEFAULT_ALTERNATIVE_COUNT: u32 = 5;

/// Upper bound on alternatives a single request may search
pub const MAX_ALTERNATIVE_COUNT: u32 = 20;

/// Result of deriving a subdomain from a display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubdomainSuggestion {
    /// Normalized candidate derived from the display name
    pub candidate: String,
    /// Validation of the candidate itself
    pub result: ValidationResult,
    /// Numbered fallbacks, only searched when the candidate is valid but taken
    pub alternatives: Vec<String>,
}

/// Checks subdomains against the naming policy and the company store
#[derive(Clone)]
pub struct SubdomainResolver {
    policy: SubdomainPolicy,
    store: Arc<dyn SubdomainStore>,
}

impl SubdomainResolver {
    pub fn new(policy: SubdomainPolicy, store: Arc<dyn SubdomainStore>) -> Self {
        Self { policy, store }
    }

    pub fn policy(&self) -> &SubdomainPolicy {
        &self.policy
    }

    /// Whether no company holds `subdomain`.
    ///
    /// Fails closed: a store error reports the name as unavailable.
    pub async fn check_availability(&self, subdomain: &str) -> bool {
        self.check_availability_excluding(subdomain, None).await
    }

    /// Like [`check_availability`](Self::check_availability), but a record owned by
    /// `owner` does not count as taken.
    #[tracing::instrument(skip(self))]
    pub async fn check_availability_excluding(
        &self,
        subdomain: &str,
        owner: Option<CompanyId>,
    ) -> bool {
        match self.store.find_by_subdomain(subdomain).await {
            Ok(None) => true,
            Ok(Some(record)) if Some(record.company_id()) == owner => true,
            Ok(Some(record)) => {
                tracing::debug!(company_id = %record.id, "subdomain already taken");
                false
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    transient = e.is_transient(),
                    "subdomain lookup failed, treating as unavailable"
                );
                false
            }
        }
    }

    /// Validate format, then availability. Malformed names never reach the store.
    pub async fn validate_subdomain(&self, candidate: &str) -> ValidationResult {
        self.validate_subdomain_for(candidate, None).await
    }

    /// Validate on behalf of `owner`, whose own current subdomain counts as available
    pub async fn validate_subdomain_for(
        &self,
        candidate: &str,
        owner: Option<CompanyId>,
    ) -> ValidationResult {
        if let Err(e) = self.policy.validate_format(candidate) {
            return ValidationResult::invalid(e.to_string());
        }

        if self.check_availability_excluding(candidate, owner).await {
            ValidationResult::available()
        } else {
            ValidationResult::taken()
        }
    }

    /// Lazily yield `base-1` through `base-count`, keeping only names that are
    /// valid and available.
    ///
    /// Each candidate's lookup completes before the next begins, so output is in
    /// ascending suffix order. The stream ends after `count` attempts even if
    /// nothing was found. Dropping it early skips the remaining lookups.
    pub fn alternatives<'a>(
        &'a self,
        base: &'a str,
        count: u32,
    ) -> impl Stream<Item = String> + Send + 'a {
        stream::iter(1..=count).filter_map(move |n| async move {
            let candidate = format!("{base}-{n}");
            if self.validate_subdomain(&candidate).await.is_assignable() {
                Some(candidate)
            } else {
                None
            }
        })
    }

    /// Collect [`alternatives`](Self::alternatives). An empty result is not an error.
    pub async fn generate_alternatives(&self, base: &str, count: u32) -> Vec<String> {
        self.alternatives(base, count).collect().await
    }

    /// Derive a subdomain from a display name and check it, offering up to
    /// `count` numbered fallbacks when the derived name is taken.
    #[tracing::instrument(skip(self))]
    pub async fn suggest(&self, display_name: &str, count: u32) -> SubdomainSuggestion {
        let candidate = normalize(display_name);
        let result = self.validate_subdomain(&candidate).await;

        let alternatives = if result.is_valid && !result.is_available {
            self.generate_alternatives(&candidate, count).await
        } else {
            Vec::new()
        };

        tracing::info!(
            candidate = %candidate,
            is_valid = result.is_valid,
            is_available = result.is_available,
            alternatives = alternatives.len(),
            "subdomain suggestion computed"
        );

        SubdomainSuggestion {
            candidate,
            result,
            alternatives,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::subdomain::policy::ReservedNames;
    use crate::subdomain::store::MemorySubdomainStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use time::OffsetDateTime;
    use uproom_shared::{CompanyRecord, StoreError};
    use uuid::Uuid;

    fn record(subdomain: &str) -> CompanyRecord {
        CompanyRecord {
            id: Uuid::new_v4(),
            name: format!("Company {subdomain}"),
            subdomain: subdomain.to_string(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn resolver_with(taken: &[&str]) -> SubdomainResolver {
        let store = MemorySubdomainStore::with_records(taken.iter().map(|s| record(s)));
        SubdomainResolver::new(SubdomainPolicy::default(), Arc::new(store))
    }

    /// Records every lookup and fails the ones listed in `failing`
    #[derive(Default)]
    struct ScriptedStore {
        taken: Vec<String>,
        failing: Vec<String>,
        lookups: Mutex<Vec<String>>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    #[async_trait]
    impl SubdomainStore for ScriptedStore {
        async fn find_by_subdomain(
            &self,
            subdomain: &str,
        ) -> Result<Option<CompanyRecord>, StoreError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            self.lookups.lock().unwrap().push(subdomain.to_string());
            tokio::task::yield_now().await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.failing.iter().any(|s| s == subdomain) {
                return Err(StoreError::Unavailable("connection reset".to_string()));
            }
            if self.taken.iter().any(|s| s == subdomain) {
                return Ok(Some(record(subdomain)));
            }
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_check_availability() {
        let resolver = resolver_with(&["acme"]);
        assert!(!resolver.check_availability("acme").await);
        assert!(resolver.check_availability("globex").await);
    }

    #[tokio::test]
    async fn test_store_fault_is_unavailable() {
        let store = ScriptedStore {
            failing: vec!["acme".to_string()],
            ..Default::default()
        };
        let resolver = SubdomainResolver::new(SubdomainPolicy::default(), Arc::new(store));

        assert!(!resolver.check_availability("acme").await);

        let result = resolver.validate_subdomain("acme").await;
        assert!(result.is_valid);
        assert!(!result.is_available);
        assert_eq!(result.message, "Subdomain is already taken");
    }

    #[tokio::test]
    async fn test_owner_may_keep_own_subdomain() {
        let own = record("acme");
        let owner = own.company_id();
        let store = MemorySubdomainStore::with_records([own]);
        let resolver = SubdomainResolver::new(SubdomainPolicy::default(), Arc::new(store));

        assert!(resolver.check_availability_excluding("acme", Some(owner)).await);
        assert!(
            !resolver
                .check_availability_excluding("acme", Some(CompanyId::new()))
                .await
        );
        assert!(resolver.validate_subdomain_for("acme", Some(owner)).await.is_assignable());
    }

    #[tokio::test]
    async fn test_validate_subdomain_messages() {
        let resolver = resolver_with(&["acme"]);

        assert_eq!(
            resolver.validate_subdomain("globex").await,
            ValidationResult {
                is_valid: true,
                is_available: true,
                message: "Subdomain is available".to_string(),
            }
        );
        assert_eq!(
            resolver.validate_subdomain("acme").await,
            ValidationResult {
                is_valid: true,
                is_available: false,
                message: "Subdomain is already taken".to_string(),
            }
        );
        assert_eq!(
            resolver.validate_subdomain("ab").await,
            ValidationResult {
                is_valid: false,
                is_available: false,
                message: "Subdomain must be at least 3 characters".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_invalid_format_skips_store() {
        let store = Arc::new(ScriptedStore::default());
        let resolver = SubdomainResolver::new(SubdomainPolicy::default(), store.clone());

        for bad in ["ab", "Acme", "-abc", "ab--cd", "admin", &"x".repeat(31)] {
            assert!(!resolver.validate_subdomain(bad).await.is_valid, "{bad}");
        }
        assert!(store.lookups.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_alternatives_skips_taken() {
        let resolver = resolver_with(&["acme", "acme-1", "acme-3"]);
        assert_eq!(
            resolver.generate_alternatives("acme", 5).await,
            vec!["acme-2", "acme-4", "acme-5"]
        );
    }

    #[tokio::test]
    async fn test_generate_alternatives_all_taken_is_empty() {
        let resolver = resolver_with(&["acme-1", "acme-2", "acme-3", "acme-4", "acme-5"]);
        assert!(resolver.generate_alternatives("acme", 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_generate_alternatives_is_bounded_and_sequential() {
        let store = Arc::new(ScriptedStore {
            taken: (1..=5).map(|n| format!("acme-{n}")).collect(),
            failing: vec!["acme-6".to_string()],
            ..Default::default()
        });
        let resolver = SubdomainResolver::new(SubdomainPolicy::default(), store.clone());

        assert!(resolver.generate_alternatives("acme", 5).await.is_empty());
        assert_eq!(
            *store.lookups.lock().unwrap(),
            vec!["acme-1", "acme-2", "acme-3", "acme-4", "acme-5"]
        );
        assert_eq!(store.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_alternatives_drop_store_faults() {
        let store = ScriptedStore {
            failing: vec!["acme-2".to_string()],
            ..Default::default()
        };
        let resolver = SubdomainResolver::new(SubdomainPolicy::default(), Arc::new(store));

        assert_eq!(
            resolver.generate_alternatives("acme", 3).await,
            vec!["acme-1", "acme-3"]
        );
    }

    #[tokio::test]
    async fn test_alternatives_respect_policy() {
        let reserved = ReservedNames::new(["acme-2"]);
        let store = MemorySubdomainStore::new();
        let resolver = SubdomainResolver::new(SubdomainPolicy::new(reserved), Arc::new(store));

        assert_eq!(
            resolver.generate_alternatives("acme", 3).await,
            vec!["acme-1", "acme-3"]
        );
        // A base near the length limit produces over-long candidates
        let base = "a".repeat(29);
        assert!(resolver.generate_alternatives(&base, 3).await.is_empty());
        assert!(resolver.generate_alternatives("acme", 0).await.is_empty());
    }

    #[tokio::test]
    async fn test_alternatives_stream_is_lazy_and_restartable() {
        let store = Arc::new(ScriptedStore::default());
        let resolver = SubdomainResolver::new(SubdomainPolicy::default(), store.clone());

        let first: Vec<String> = resolver.alternatives("acme", 5).take(2).collect().await;
        assert_eq!(first, vec!["acme-1", "acme-2"]);
        assert_eq!(store.lookups.lock().unwrap().len(), 2);

        let again = resolver.generate_alternatives("acme", 5).await;
        assert_eq!(again, vec!["acme-1", "acme-2", "acme-3", "acme-4", "acme-5"]);
    }

    #[tokio::test]
    async fn test_suggest_free_name() {
        let resolver = resolver_with(&[]);
        let suggestion = resolver.suggest("Acme Corp!!", DEFAULT_ALTERNATIVE_COUNT).await;

        assert_eq!(suggestion.candidate, "acme-corp");
        assert!(suggestion.result.is_assignable());
        assert!(suggestion.alternatives.is_empty());
    }

    #[tokio::test]
    async fn test_suggest_taken_name_offers_alternatives() {
        let resolver = resolver_with(&["acme-corp", "acme-corp-2"]);
        let suggestion = resolver.suggest("ACME corp", 3).await;

        assert_eq!(suggestion.candidate, "acme-corp");
        assert!(!suggestion.result.is_available);
        assert_eq!(suggestion.alternatives, vec!["acme-corp-1", "acme-corp-3"]);
    }

    #[tokio::test]
    async fn test_suggest_invalid_name_has_no_alternatives() {
        let resolver = resolver_with(&[]);
        let suggestion = resolver.suggest("A!", 5).await;

        assert_eq!(suggestion.candidate, "a");
        assert!(!suggestion.result.is_valid);
        assert_eq!(
            suggestion.result.message,
            "Subdomain must be at least 3 characters"
        );
        assert!(suggestion.alternatives.is_empty());
    }
}
