use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use lambda_http::tracing::{debug, warn};

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use draft_shared::models::draft::responses::GameView;
use draft_shared::models::invite::requests::SendInviteRequest;
use draft_shared::models::invite::responses::InviteSentResponse;
use draft_shared::models::invite::Invite;
use draft_shared::services::errors::invite_service_errors::InviteServiceError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/invites", post(send_invite).get(list_pending))
        .route("/invites/{invite_id}/accept", post(accept_invite))
        .route("/invites/{invite_id}/decline", post(decline_invite))
}

fn rejected(action: &str, invite_id: &str, caller_id: &str, e: InviteServiceError) -> ApiError {
    warn!(
        "{} rejected for {} on invite {}: {}",
        action, caller_id, invite_id, e
    );
    ApiError::from(e)
}

async fn send_invite(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<SendInviteRequest>,
) -> Result<(StatusCode, Json<InviteSentResponse>), ApiError> {
    let (invite, game) = state
        .invite_service
        .send_invite(&user.user_id, &payload.username)
        .await?;
    debug!("Invite {} sent by {}", invite.invite_id, user.user_id);

    let game = GameView::for_participant(&game, &user.user_id, state.game_service.max_skips());
    Ok((StatusCode::CREATED, Json(InviteSentResponse { invite, game })))
}

async fn list_pending(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Invite>>, ApiError> {
    let invites = state.invite_service.list_pending(&user.user_id).await?;
    Ok(Json(invites))
}

async fn accept_invite(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(invite_id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let game = state
        .invite_service
        .accept_invite(&invite_id, &user.user_id)
        .await
        .map_err(|e| rejected("accept", &invite_id, &user.user_id, e))?;
    Ok(Json(GameView::for_participant(
        &game,
        &user.user_id,
        state.game_service.max_skips(),
    )))
}

async fn decline_invite(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(invite_id): Path<String>,
) -> Result<Json<Invite>, ApiError> {
    let invite = state
        .invite_service
        .decline_invite(&invite_id, &user.user_id)
        .await
        .map_err(|e| rejected("decline", &invite_id, &user.user_id, e))?;
    Ok(Json(invite))
}
