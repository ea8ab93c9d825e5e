use crate::models::invite::InviteStatus;
use crate::repositories::errors::invite_repository_errors::InviteRepositoryError;
use crate::services::errors::error_kind::ErrorKind;
use crate::services::errors::game_service_errors::GameServiceError;

#[derive(Debug, PartialEq)]
pub enum InviteServiceError {
    InviteNotFound,
    ReceiverNotFound,
    /// Only the receiver may answer an invite.
    NotInvitee,
    InviteNotPending(InviteStatus),
    SelfInvite,
    ValidationError(String),
    Game(GameServiceError),
    RepositoryError(String),
}

impl InviteServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InviteServiceError::InviteNotFound | InviteServiceError::ReceiverNotFound => {
                ErrorKind::NotFound
            }
            InviteServiceError::NotInvitee => ErrorKind::Forbidden,
            InviteServiceError::InviteNotPending(_) => ErrorKind::InvalidState,
            InviteServiceError::SelfInvite | InviteServiceError::ValidationError(_) => {
                ErrorKind::Validation
            }
            InviteServiceError::Game(err) => err.kind(),
            InviteServiceError::RepositoryError(_) => ErrorKind::Internal,
        }
    }
}

impl std::fmt::Display for InviteServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InviteServiceError::InviteNotFound => write!(f, "Invite not found"),
            InviteServiceError::ReceiverNotFound => write!(f, "No user with that username"),
            InviteServiceError::NotInvitee => write!(f, "Invite was sent to someone else"),
            InviteServiceError::InviteNotPending(status) => {
                write!(f, "Invite already {}", status)
            }
            InviteServiceError::SelfInvite => write!(f, "Cannot invite yourself"),
            InviteServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            InviteServiceError::Game(err) => write!(f, "{}", err),
            InviteServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for InviteServiceError {}

impl From<GameServiceError> for InviteServiceError {
    fn from(err: GameServiceError) -> Self {
        InviteServiceError::Game(err)
    }
}

impl From<InviteRepositoryError> for InviteServiceError {
    fn from(err: InviteRepositoryError) -> Self {
        InviteServiceError::RepositoryError(err.to_string())
    }
}
