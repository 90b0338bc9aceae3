use axum::extract::{Extension, State};

use crate::database::User;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;
use crate::services::{ProfileLookup, ProfileService};
use crate::types::UserId;

pub const UNAUTHENTICATED_MESSAGE: &str = "Unauthorized - user not authenticated";
pub const NOT_FOUND_MESSAGE: &str = "User profile not found";
pub const FAILURE_MESSAGE: &str = "Failed to retrieve user profile";
pub const SUCCESS_MESSAGE: &str = "Profile retrieved successfully";

/// GET /api/v1/profile - Get the authenticated caller's own profile
///
/// Expected Output:
/// ```json
/// {
///   "success": true,
///   "message": "Profile retrieved successfully",
///   "data": {
///     "id": 42,
///     "username": "alice",
///     "email": "alice@example.com",
///     "first_name": "Alice",
///     "last_name": "Liddell",
///     "role": "admin",
///     "is_active": true,
///     "created_at": "2024-01-01T00:00:00Z",
///     "updated_at": "2024-01-01T00:00:00Z"
///   }
/// }
/// ```
pub async fn profile_get(
    State(state): State<AppState>,
    principal: Option<Extension<AuthUser>>,
) -> ApiResult<User> {
    let user_id = principal.map(|Extension(user)| user.user_id);
    get_profile(&state, user_id).await
}

/// Resolve the profile for an explicitly supplied principal.
///
/// 401 without a principal (no query is issued), 404 when no row matches,
/// 500 on any repository failure, 200 with the row otherwise.
pub async fn get_profile(state: &AppState, user_id: Option<UserId>) -> ApiResult<User> {
    let Some(user_id) = user_id else {
        return Err(ApiError::unauthorized(UNAUTHENTICATED_MESSAGE));
    };

    match ProfileService::new(state.users.as_ref()).lookup(user_id).await {
        ProfileLookup::Found(user) => {
            tracing::debug!("Profile retrieved for user {}", user_id);
            Ok(ApiResponse::success(SUCCESS_MESSAGE, user))
        }
        ProfileLookup::NotFound => {
            tracing::warn!("Profile not found for authenticated user {}", user_id);
            Err(ApiError::not_found(NOT_FOUND_MESSAGE))
        }
        ProfileLookup::Failed(e) => Err(ApiError::internal_failure(
            FAILURE_MESSAGE,
            &e,
            state.expose_error_details,
        )),
    }
}
