//! Subdomain routes
//!
//! Thin JSON wrappers around [`SubdomainResolver`](crate::subdomain::SubdomainResolver).
//! Name problems are reported in the response body, not as HTTP errors.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};
use uproom_shared::{CompanyId, ValidationResult};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
    subdomain::{
        build_url, extract_subdomain_from_host, SubdomainSuggestion, MAX_ALTERNATIVE_COUNT,
    },
};

// =============================================================================
// Request/Response Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CheckSubdomainRequest {
    pub subdomain: String,
    /// Company re-submitting its own subdomain
    pub company_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestSubdomainRequest {
    pub name: String,
    pub count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SuggestSubdomainResponse {
    #[serde(flatten)]
    pub suggestion: SubdomainSuggestion,
    /// Tenant URL for the candidate, when it can be assigned
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AlternativesQuery {
    pub count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct AlternativesResponse {
    pub base: String,
    pub alternatives: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CurrentSubdomainResponse {
    pub subdomain: Option<String>,
    pub url: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /subdomains/check
pub async fn check_subdomain(
    State(state): State<AppState>,
    Json(req): Json<CheckSubdomainRequest>,
) -> ApiResult<Json<ValidationResult>> {
    let subdomain = req.subdomain.trim().to_lowercase();
    let owner = req.company_id.map(CompanyId::from);

    let result = state.resolver.validate_subdomain_for(&subdomain, owner).await;

    Ok(Json(result))
}

/// POST /subdomains/suggest
pub async fn suggest_subdomain(
    State(state): State<AppState>,
    Json(req): Json<SuggestSubdomainRequest>,
) -> ApiResult<Json<SuggestSubdomainResponse>> {
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Company name is required".to_string()));
    }
    let count = resolve_count(req.count, state.alternative_count)?;

    let suggestion = state.resolver.suggest(&req.name, count).await;
    let url = suggestion
        .result
        .is_assignable()
        .then(|| build_url(&suggestion.candidate, &state.protocol, &state.domains));

    Ok(Json(SuggestSubdomainResponse { suggestion, url }))
}

/// GET /subdomains/alternatives/:base
pub async fn list_alternatives(
    State(state): State<AppState>,
    Path(base): Path<String>,
    Query(query): Query<AlternativesQuery>,
) -> ApiResult<Json<AlternativesResponse>> {
    let base = base.trim().to_lowercase();
    if base.is_empty() {
        return Err(ApiError::BadRequest("Base subdomain is required".to_string()));
    }
    let count = resolve_count(query.count, state.alternative_count)?;

    let alternatives = state.resolver.generate_alternatives(&base, count).await;

    Ok(Json(AlternativesResponse { base, alternatives }))
}

/// GET /subdomains/current
///
/// Reports the tenant label of the request's `Host` header.
pub async fn current_subdomain(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<CurrentSubdomainResponse>> {
    let subdomain = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_subdomain_from_host);
    let url = subdomain
        .as_deref()
        .map(|s| build_url(s, &state.protocol, &state.domains));

    Ok(Json(CurrentSubdomainResponse { subdomain, url }))
}

fn resolve_count(requested: Option<u32>, default: u32) -> ApiResult<u32> {
    match requested {
        None => Ok(default),
        Some(n) if (1..=MAX_ALTERNATIVE_COUNT).contains(&n) => Ok(n),
        Some(_) => Err(ApiError::Validation(format!(
            "count must be between 1 and {MAX_ALTERNATIVE_COUNT}"
        ))),
    }
}
