use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::models::draft::requests::PlayerRequest;
use crate::models::draft::responses::{RosterView, RostersResponse};
use crate::models::game::Game;
use crate::models::pick::DraftedPlayer;
use crate::models::roster::{Position, UnknownPosition};
use crate::repositories::errors::game_repository_errors::GameRepositoryError;
use crate::repositories::game_repository::GameRepository;
use crate::services::draft_engine::{DraftEngine, DraftRules, JoinOutcome};
use crate::services::errors::draft_errors::DraftError;
use crate::services::errors::game_service_errors::GameServiceError;

const INVITE_CODE_LEN: usize = 6;
const INVITE_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const INVITE_CODE_ATTEMPTS: usize = 5;
const MAX_LISTED_GAMES: usize = 20;
const PLAYER_FIELD_MAX_LEN: usize = 64;

/// Entry point for every game operation.
///
/// Each state change is a single read-validate-commit against the repository:
/// the engine runs on the snapshot that was read, and the commit only lands if
/// the stored version has not moved since. A losing commit is re-checked
/// against the fresh state so the caller sees the rejection that applies now.
#[derive(Clone)]
pub struct GameService {
    repository: Arc<dyn GameRepository + Send + Sync>,
    engine: DraftEngine,
}

impl GameService {
    pub fn new(repository: Arc<dyn GameRepository + Send + Sync>, rules: DraftRules) -> Self {
        GameService {
            repository,
            engine: DraftEngine::new(rules),
        }
    }

    pub fn max_skips(&self) -> u32 {
        self.engine.rules().max_skips
    }

    pub async fn create_game(&self, initiator_id: &str) -> Result<Game, GameServiceError> {
        require_identity(initiator_id)?;

        for _ in 0..INVITE_CODE_ATTEMPTS {
            let invite_code = generate_invite_code();
            if self
                .repository
                .find_by_invite_code(&invite_code)
                .await?
                .is_some()
            {
                debug!(invite_code = %invite_code, "invite code taken, regenerating");
                continue;
            }

            let game = Game::new(initiator_id, &invite_code);
            self.repository.create_game(&game).await?;
            info!(game_id = %game.game_id, initiator = initiator_id, "game created");
            return Ok(game);
        }

        warn!(
            initiator = initiator_id,
            attempts = INVITE_CODE_ATTEMPTS,
            "no free invite code"
        );
        Err(GameServiceError::InviteCodeExhausted)
    }

    pub async fn join_game(&self, game_id: &str, joiner_id: &str) -> Result<Game, GameServiceError> {
        require_identity(joiner_id)?;
        let (game, outcome) = self
            .apply(game_id, |engine, game| engine.join(game, joiner_id))
            .await?;
        if outcome == JoinOutcome::Joined {
            info!(game_id, joiner = joiner_id, "participant joined, draft started");
        }
        Ok(game)
    }

    pub async fn join_game_by_code(
        &self,
        invite_code: &str,
        joiner_id: &str,
    ) -> Result<Game, GameServiceError> {
        let code = invite_code.trim().to_ascii_uppercase();
        if code.is_empty() {
            return Err(GameServiceError::ValidationError(
                "Invite code cannot be empty".to_string(),
            ));
        }
        let game = self
            .repository
            .find_by_invite_code(&code)
            .await?
            .ok_or(GameServiceError::InvalidInviteCode)?;
        self.join_game(&game.game_id, joiner_id).await
    }

    pub async fn submit_pick(
        &self,
        game_id: &str,
        caller_id: &str,
        request: &PlayerRequest,
    ) -> Result<Game, GameServiceError> {
        let player = parse_player(request)?;
        let (game, pick) = self
            .apply(game_id, |engine, game| {
                engine.accept_pick(game, caller_id, &player)
            })
            .await?;
        info!(
            game_id,
            caller = caller_id,
            slot = %pick.slot,
            player = %pick.player.name,
            status = %game.status,
            "pick accepted"
        );
        Ok(game)
    }

    pub async fn submit_skip(&self, game_id: &str, caller_id: &str) -> Result<Game, GameServiceError> {
        let (game, used) = self
            .apply(game_id, |engine, game| engine.accept_skip(game, caller_id))
            .await?;
        info!(game_id, caller = caller_id, skips_used = used, "skip accepted");
        Ok(game)
    }

    /// Reads a game. Only its participants may see it.
    pub async fn get_game(&self, game_id: &str, caller_id: &str) -> Result<Game, GameServiceError> {
        let game = self.load(game_id).await?;
        if !game.is_participant(caller_id) {
            return Err(DraftError::NotParticipant.into());
        }
        Ok(game)
    }

    /// Both rosters of a game, the caller's first.
    pub async fn get_rosters(
        &self,
        game_id: &str,
        caller_id: &str,
    ) -> Result<RostersResponse, GameServiceError> {
        let game = self.get_game(game_id, caller_id).await?;
        let seat = game.seat_of(caller_id).ok_or(DraftError::NotParticipant)?;
        let max_skips = self.max_skips();

        let mine = RosterView::build(&game, seat, max_skips).ok_or(DraftError::NotParticipant)?;
        Ok(RostersResponse {
            mine,
            opponent: RosterView::build(&game, seat.other(), max_skips),
        })
    }

    /// The caller's most recently updated games.
    pub async fn list_games(&self, caller_id: &str) -> Result<Vec<Game>, GameServiceError> {
        require_identity(caller_id)?;
        Ok(self
            .repository
            .list_games_for_participant(caller_id, MAX_LISTED_GAMES)
            .await?)
    }

    async fn load(&self, game_id: &str) -> Result<Game, GameServiceError> {
        self.repository
            .get_game(game_id)
            .await?
            .ok_or(GameServiceError::GameNotFound)
    }

    async fn apply<T, F>(&self, game_id: &str, action: F) -> Result<(Game, T), GameServiceError>
    where
        F: Fn(&DraftEngine, &mut Game) -> Result<T, DraftError>,
    {
        let current = self.load(game_id).await?;
        let mut next = current.clone();
        let outcome = action(&self.engine, &mut next).map_err(|err| {
            debug!(game_id, error = %err, "action rejected");
            GameServiceError::from(err)
        })?;

        if next == current {
            return Ok((current, outcome));
        }

        next.version = current.version + 1;
        next.updated_at = Utc::now();

        match self.repository.commit_game(&next, current.version).await {
            Ok(()) => Ok((next, outcome)),
            Err(GameRepositoryError::VersionConflict) => {
                warn!(
                    game_id,
                    read_version = current.version,
                    "lost commit race, re-checking against fresh state"
                );
                let mut fresh = self.load(game_id).await?;
                action(&self.engine, &mut fresh)?;
                Err(GameServiceError::ConcurrentModification)
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn require_identity(participant_id: &str) -> Result<(), GameServiceError> {
    if participant_id.trim().is_empty() {
        return Err(GameServiceError::ValidationError(
            "Participant ID cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn parse_player(request: &PlayerRequest) -> Result<DraftedPlayer, GameServiceError> {
    if request.name.trim().is_empty() || request.team.trim().is_empty() {
        return Err(GameServiceError::ValidationError(
            "Player name and team cannot be empty".to_string(),
        ));
    }
    if request.name.trim().chars().count() > PLAYER_FIELD_MAX_LEN
        || request.team.trim().chars().count() > PLAYER_FIELD_MAX_LEN
    {
        return Err(GameServiceError::ValidationError(format!(
            "Player name and team must be at most {} characters",
            PLAYER_FIELD_MAX_LEN
        )));
    }
    let position: Position = request
        .position
        .parse()
        .map_err(|e: UnknownPosition| GameServiceError::ValidationError(e.to_string()))?;
    Ok(DraftedPlayer::new(&request.name, &request.team, position))
}

fn generate_invite_code() -> String {
    let mut rng = rand::thread_rng();
    (0..INVITE_CODE_LEN)
        .map(|_| INVITE_CODE_CHARSET[rng.gen_range(0..INVITE_CODE_CHARSET.len())] as char)
        .collect()
}
