use axum::{http::HeaderValue, middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::TokenKeys;
use crate::config::SecurityConfig;
use crate::database::UserRepository;
use crate::handlers;
use crate::middleware::jwt_auth_middleware;

/// Shared per-process dependencies handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<TokenKeys>,
    pub expose_error_details: bool,
}

/// Full application router, without CORS
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(api_v1_routes(state.clone()))
        .fallback(handlers::route_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Application router with the CORS policy from configuration applied
pub fn app_with_cors(state: AppState, security: &SecurityConfig) -> Router {
    let router = app(state);
    match cors_layer(security) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

fn api_v1_routes(state: AppState) -> Router<AppState> {
    use handlers::protected;

    Router::new()
        .route("/api/v1/profile", get(protected::profile_get))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(CorsLayer::new().allow_origin(origins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn cors_disabled_yields_no_layer() {
        let mut security = AppConfig::development().security;
        security.enable_cors = false;
        assert!(cors_layer(&security).is_none());
    }

    #[test]
    fn cors_enabled_yields_layer() {
        assert!(cors_layer(&AppConfig::development().security).is_some());
        assert!(cors_layer(&AppConfig::production().security).is_some());
    }
}
