use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::roster::{Position, Slot};

/// The sports player being drafted. Opaque to the engine apart from its
/// identity (name + team) and position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftedPlayer {
    pub name: String,
    pub team: String,
    pub position: Position,
}

impl DraftedPlayer {
    pub fn new(name: &str, team: &str, position: Position) -> Self {
        DraftedPlayer {
            name: name.trim().to_string(),
            team: team.trim().to_string(),
            position,
        }
    }

    /// Two players are the same draftee when name and team match, ignoring case
    /// and surrounding whitespace.
    pub fn same_identity(&self, other: &DraftedPlayer) -> bool {
        self.name.trim().eq_ignore_ascii_case(other.name.trim())
            && self.team.trim().eq_ignore_ascii_case(other.team.trim())
    }
}

/// An immutable roster assignment. Picks are only ever appended to a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    pub participant_id: String,
    pub slot: Slot,
    pub player: DraftedPlayer,
    /// 1-based position of the pick within the game.
    pub sequence: u32,
    pub created_at: DateTime<Utc>,
}
