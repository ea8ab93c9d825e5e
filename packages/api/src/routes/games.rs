use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lambda_http::tracing::{debug, warn};

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use draft_shared::models::draft::requests::{JoinByCodeRequest, SubmitPickRequest};
use draft_shared::models::draft::responses::{GameSummary, GameView, RostersResponse};
use draft_shared::models::game::Game;
use draft_shared::services::errors::game_service_errors::GameServiceError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/games", post(create_game).get(list_games))
        .route("/games/join", post(join_by_code))
        .route("/games/{game_id}", get(get_game))
        .route("/games/{game_id}/join", post(join_game))
        .route("/games/{game_id}/rosters", get(get_rosters))
        .route("/games/{game_id}/picks", post(submit_pick))
        .route("/games/{game_id}/skip", post(submit_skip))
}

fn view(state: &AppState, game: &Game, caller_id: &str) -> Json<GameView> {
    Json(GameView::for_participant(
        game,
        caller_id,
        state.game_service.max_skips(),
    ))
}

fn rejected(action: &str, game_id: &str, caller_id: &str, e: GameServiceError) -> ApiError {
    warn!(
        "{} rejected for {} in game {}: {}",
        action, caller_id, game_id, e
    );
    ApiError::from(e)
}

async fn create_game(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<(StatusCode, Json<GameView>), ApiError> {
    let game = state.game_service.create_game(&user.user_id).await?;
    debug!("Game {} created by {}", game.game_id, user.user_id);
    Ok((StatusCode::CREATED, view(&state, &game, &user.user_id)))
}

async fn list_games(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<GameSummary>>, ApiError> {
    let games = state.game_service.list_games(&user.user_id).await?;
    Ok(Json(
        games
            .iter()
            .map(|game| GameSummary::for_participant(game, &user.user_id))
            .collect(),
    ))
}

async fn join_by_code(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<JoinByCodeRequest>,
) -> Result<Json<GameView>, ApiError> {
    let game = state
        .game_service
        .join_game_by_code(&payload.invite_code, &user.user_id)
        .await
        .map_err(|e| rejected("join", &payload.invite_code, &user.user_id, e))?;
    Ok(view(&state, &game, &user.user_id))
}

async fn join_game(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(game_id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let game = state
        .game_service
        .join_game(&game_id, &user.user_id)
        .await
        .map_err(|e| rejected("join", &game_id, &user.user_id, e))?;
    Ok(view(&state, &game, &user.user_id))
}

async fn get_game(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(game_id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let game = state.game_service.get_game(&game_id, &user.user_id).await?;
    Ok(view(&state, &game, &user.user_id))
}

async fn get_rosters(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(game_id): Path<String>,
) -> Result<Json<RostersResponse>, ApiError> {
    let rosters = state
        .game_service
        .get_rosters(&game_id, &user.user_id)
        .await?;
    Ok(Json(rosters))
}

async fn submit_pick(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(game_id): Path<String>,
    Json(payload): Json<SubmitPickRequest>,
) -> Result<Json<GameView>, ApiError> {
    let game = state
        .game_service
        .submit_pick(&game_id, &user.user_id, &payload.player)
        .await
        .map_err(|e| rejected("pick", &game_id, &user.user_id, e))?;
    Ok(view(&state, &game, &user.user_id))
}

async fn submit_skip(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(game_id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let game = state
        .game_service
        .submit_skip(&game_id, &user.user_id)
        .await
        .map_err(|e| rejected("skip", &game_id, &user.user_id, e))?;
    Ok(view(&state, &game, &user.user_id))
}
