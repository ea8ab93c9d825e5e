use crate::repositories::errors::game_repository_errors::GameRepositoryError;
use crate::services::errors::draft_errors::DraftError;
use crate::services::errors::error_kind::ErrorKind;

#[derive(Debug, PartialEq)]
pub enum GameServiceError {
    GameNotFound,
    InvalidInviteCode,
    Draft(DraftError),
    ValidationError(String),
    /// Lost a race: another request committed first and the action would
    /// still have been accepted against the fresh state.
    ConcurrentModification,
    /// Every generated invite code was already taken.
    InviteCodeExhausted,
    RepositoryError(GameRepositoryError),
}

impl GameServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameServiceError::GameNotFound | GameServiceError::InvalidInviteCode => {
                ErrorKind::NotFound
            }
            GameServiceError::Draft(err) => err.kind(),
            GameServiceError::ValidationError(_) => ErrorKind::Validation,
            GameServiceError::ConcurrentModification
            | GameServiceError::InviteCodeExhausted => ErrorKind::Conflict,
            GameServiceError::RepositoryError(_) => ErrorKind::Internal,
        }
    }
}

impl std::fmt::Display for GameServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameServiceError::GameNotFound => write!(f, "Game not found"),
            GameServiceError::InvalidInviteCode => write!(f, "Invalid invite code"),
            GameServiceError::Draft(err) => write!(f, "{}", err),
            GameServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            GameServiceError::ConcurrentModification => {
                write!(f, "Game changed concurrently, refresh and try again")
            }
            GameServiceError::InviteCodeExhausted => {
                write!(f, "Could not allocate an invite code, try again")
            }
            GameServiceError::RepositoryError(err) => write!(f, "Repository error: {}", err),
        }
    }
}

impl std::error::Error for GameServiceError {}

impl From<GameRepositoryError> for GameServiceError {
    fn from(err: GameRepositoryError) -> Self {
        GameServiceError::RepositoryError(err)
    }
}

impl From<DraftError> for GameServiceError {
    fn from(err: DraftError) -> Self {
        GameServiceError::Draft(err)
    }
}
