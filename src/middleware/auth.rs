use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use async_trait::async_trait;

use crate::access::{decide, AccessDecision};
use crate::error::{ApiError, Legacy};
use crate::identity::Identity;
use crate::state::AppState;

/// Identity resolved by the access gate, `None` for anonymous callers
#[derive(Clone, Debug)]
pub struct ResolvedIdentity(pub Option<Identity>);

/// Access gate: resolve the caller once, classify the path, allow or challenge.
///
/// A challenge ends the request with 401 before any handler runs.
pub async fn access_gate_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let classification = state.access.classify(&path);
    let identity = state.identity.resolve(request.headers()).await;

    match decide(classification, identity.as_ref(), state.unclassified_policy) {
        AccessDecision::Allow => {
            tracing::debug!(
                path = %path,
                classification = %classification,
                authenticated = identity.is_some(),
                "Access allowed"
            );
            request.extensions_mut().insert(ResolvedIdentity(identity));
            next.run(request).await
        }
        AccessDecision::Challenge => {
            tracing::warn!(path = %path, classification = %classification, "Access challenged: no identity");
            let error = ApiError::unauthorized("Unauthorized");
            if state.access.uses_legacy_envelope(&path) {
                Legacy(error).into_response()
            } else {
                error.into_response()
            }
        }
    }
}

/// Authenticated caller for protected handlers.
///
/// Uses the identity stored by the gate, re-deriving it through the same
/// resolver when the gate did not run. Rejects with 401.
#[derive(Clone, Debug)]
pub struct Caller(pub Identity);

async fn caller_from_parts(parts: &Parts, state: &AppState) -> Option<Identity> {
    match parts.extensions.get::<ResolvedIdentity>() {
        Some(ResolvedIdentity(identity)) => identity.clone(),
        None => state.identity.resolve(&parts.headers).await,
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        caller_from_parts(parts, state)
            .await
            .map(Caller)
            .ok_or_else(|| ApiError::unauthorized("Unauthorized"))
    }
}

/// Same as [`Caller`], rejecting with the error-only envelope
#[derive(Clone, Debug)]
pub struct LegacyCaller(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for LegacyCaller {
    type Rejection = Legacy;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        caller_from_parts(parts, state)
            .await
            .map(LegacyCaller)
            .ok_or_else(|| Legacy(ApiError::unauthorized("Unauthorized")))
    }
}
