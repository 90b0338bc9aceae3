// handlers/mod.rs - HTTP handlers
//
// Protected handlers sit behind the bearer-token middleware, which attaches an
// AuthUser when the caller presents a valid token. Handlers receive the
// principal as an explicit argument and decide what an anonymous caller gets.
pub mod protected;

pub use protected::*;

use crate::error::ApiError;

/// Fallback for unmatched routes
pub async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
