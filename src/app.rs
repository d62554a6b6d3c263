use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{protected, public};
use crate::middleware::access_gate_middleware;
use crate::state::AppState;

/// Full router with the access gate in front of every route and the fallback
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/health", get(public::health))
        .route("/api/test-mongo", get(public::test_mongo))
        // Protected
        .merge(analysis_routes())
        .merge(billing_routes())
        .fallback(public::not_found)
        .layer(from_fn_with_state(state.clone(), access_gate_middleware))
        .with_state(state)
}

fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/api/analytics/mongo", get(protected::mongo_analytics))
        .route("/api/reports/mongo", get(protected::mongo_reports))
        .route("/api/reports/user", get(protected::user_reports))
        .route("/api/health-query", post(protected::health_query))
}

fn billing_routes() -> Router<AppState> {
    Router::new()
        .route("/api/payments/history", get(protected::payment_history))
        .route("/api/subscription/status", get(protected::subscription_status))
}

/// CORS for the configured origins; permissive when none parse
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();
    if parsed.is_empty() {
        tracing::warn!("No usable CORS_ORIGINS configured; allowing any origin");
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(parsed))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    }
}

/// Router with the global HTTP layers used by the server binary
pub fn app_with_layers(state: AppState, cors_origins: &[String]) -> Router {
    app(state)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}
