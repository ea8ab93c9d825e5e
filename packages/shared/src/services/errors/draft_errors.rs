use crate::models::game::GameStatus;
use crate::models::roster::Position;
use crate::services::errors::error_kind::ErrorKind;

/// Reasons the draft engine refuses an action. Every variant is raised before
/// the game is touched.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftError {
    NotParticipant,
    NotYourTurn,
    DraftNotActive(GameStatus),
    GameFull,
    PlayerAlreadyDrafted(String),
    RosterFull,
    NoEligibleSlot(Position),
    NoSkipsRemaining,
}

impl DraftError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DraftError::NotParticipant | DraftError::NotYourTurn => ErrorKind::Forbidden,
            DraftError::DraftNotActive(_) => ErrorKind::InvalidState,
            DraftError::GameFull
            | DraftError::PlayerAlreadyDrafted(_)
            | DraftError::RosterFull
            | DraftError::NoEligibleSlot(_)
            | DraftError::NoSkipsRemaining => ErrorKind::Conflict,
        }
    }
}

impl std::fmt::Display for DraftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftError::NotParticipant => write!(f, "Not a participant of this game"),
            DraftError::NotYourTurn => write!(f, "Not your turn"),
            DraftError::DraftNotActive(status) => {
                write!(f, "Draft not active (game is {})", status)
            }
            DraftError::GameFull => write!(f, "Game already has two participants"),
            DraftError::PlayerAlreadyDrafted(name) => write!(f, "{} was already drafted", name),
            DraftError::RosterFull => write!(f, "Roster full"),
            DraftError::NoEligibleSlot(position) => write!(f, "No open slot for {}", position),
            DraftError::NoSkipsRemaining => write!(f, "No skips left"),
        }
    }
}

impl std::error::Error for DraftError {}
