use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lambda_http::tracing::{debug, warn};

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use draft_shared::models::auth::requests::{LoginRequest, SignupRequest};
use draft_shared::models::auth::responses::LoginResponse;
use draft_shared::models::user::UserProfile;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
}

async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    let profile = state
        .auth_service
        .signup(&payload.username, &payload.password)
        .await
        .map_err(|e| {
            warn!("Failed to sign up {}: {}", payload.username, e);
            ApiError::from(e)
        })?;
    debug!("User created successfully: {}", profile.username);
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    state
        .auth_service
        .login(&payload.username, &payload.password)
        .await
        .map(Json)
        .map_err(|e| {
            warn!("Failed to authenticate user {}: {}", payload.username, e);
            ApiError::from(e)
        })
}

async fn me(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<UserProfile>, ApiError> {
    state
        .auth_service
        .profile(&authenticated_user.user_id)
        .await
        .map(Json)
        .map_err(ApiError::from)
}
