use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::pick::{DraftedPlayer, Pick};
use crate::models::roster::{Slot, ROSTER_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Pending,
    Drafting,
    Complete,
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::Pending => write!(f, "PENDING"),
            GameStatus::Drafting => write!(f, "DRAFTING"),
            GameStatus::Complete => write!(f, "COMPLETE"),
        }
    }
}

/// Which side of the game a participant sits on. Seat A created the game and
/// always drafts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    A,
    B,
}

impl Seat {
    pub fn other(self) -> Seat {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }
}

/// A single draft contest between two participants, picks included.
///
/// The whole record (picks too) is stored and committed as one unit; `version`
/// is bumped on every commit and checked by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub game_id: String,
    pub invite_code: String,
    pub participant_a: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_b: Option<String>,
    pub status: GameStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_turn: Option<String>,
    pub skips_used_a: u32,
    pub skips_used_b: u32,
    #[serde(default)]
    pub picks: Vec<Pick>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Game {
    pub fn new(initiator_id: &str, invite_code: &str) -> Self {
        let now = Utc::now();
        Game {
            game_id: Uuid::new_v4().to_string(),
            invite_code: invite_code.to_string(),
            participant_a: initiator_id.to_string(),
            participant_b: None,
            status: GameStatus::Pending,
            current_turn: None,
            skips_used_a: 0,
            skips_used_b: 0,
            picks: vec![],
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn seat_of(&self, participant_id: &str) -> Option<Seat> {
        if self.participant_a == participant_id {
            Some(Seat::A)
        } else if self.participant_b.as_deref() == Some(participant_id) {
            Some(Seat::B)
        } else {
            None
        }
    }

    pub fn is_participant(&self, participant_id: &str) -> bool {
        self.seat_of(participant_id).is_some()
    }

    pub fn participant(&self, seat: Seat) -> Option<&str> {
        match seat {
            Seat::A => Some(self.participant_a.as_str()),
            Seat::B => self.participant_b.as_deref(),
        }
    }

    pub fn opponent_of(&self, participant_id: &str) -> Option<&str> {
        self.seat_of(participant_id)
            .and_then(|seat| self.participant(seat.other()))
    }

    pub fn skips_used(&self, seat: Seat) -> u32 {
        match seat {
            Seat::A => self.skips_used_a,
            Seat::B => self.skips_used_b,
        }
    }

    pub fn picks_for<'a>(&'a self, participant_id: &'a str) -> impl Iterator<Item = &'a Pick> {
        self.picks
            .iter()
            .filter(move |pick| pick.participant_id == participant_id)
    }

    pub fn pick_count(&self, participant_id: &str) -> usize {
        self.picks_for(participant_id).count()
    }

    pub fn filled_slots(&self, participant_id: &str) -> Vec<Slot> {
        self.picks_for(participant_id).map(|pick| pick.slot).collect()
    }

    pub fn roster_full(&self, participant_id: &str) -> bool {
        self.pick_count(participant_id) >= ROSTER_SIZE
    }

    pub fn is_drafted(&self, player: &DraftedPlayer) -> bool {
        self.picks
            .iter()
            .any(|pick| pick.player.same_identity(player))
    }

    pub fn is_my_turn(&self, participant_id: &str) -> bool {
        self.current_turn.as_deref() == Some(participant_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_is_pending() {
        let game = Game::new("alice", "ABC123");

        assert_eq!(game.participant_a, "alice");
        assert!(game.participant_b.is_none());
        assert_eq!(game.status, GameStatus::Pending);
        assert!(game.current_turn.is_none());
        assert_eq!(game.skips_used_a, 0);
        assert_eq!(game.skips_used_b, 0);
        assert!(game.picks.is_empty());
        assert_eq!(game.version, 0);
        assert_eq!(game.invite_code, "ABC123");
    }

    #[test]
    fn test_game_id_uniqueness() {
        let first = Game::new("alice", "AAAAAA");
        let second = Game::new("alice", "AAAAAA");
        assert_ne!(first.game_id, second.game_id);
    }

    #[test]
    fn test_seats() {
        let mut game = Game::new("alice", "ABC123");
        assert_eq!(game.seat_of("alice"), Some(Seat::A));
        assert_eq!(game.seat_of("bob"), None);
        assert_eq!(game.opponent_of("alice"), None);

        game.participant_b = Some("bob".to_string());
        assert_eq!(game.seat_of("bob"), Some(Seat::B));
        assert_eq!(game.opponent_of("alice"), Some("bob"));
        assert_eq!(game.opponent_of("bob"), Some("alice"));
        assert!(!game.is_participant("mallory"));
    }

    #[test]
    fn test_status_serialization() {
        let serialized = serde_json::to_string(&GameStatus::Drafting).unwrap();
        assert_eq!(serialized, "\"DRAFTING\"");

        let deserialized: GameStatus = serde_json::from_str("\"COMPLETE\"").unwrap();
        assert_eq!(deserialized, GameStatus::Complete);
    }

    #[test]
    fn test_unset_optionals_are_omitted() {
        let game = Game::new("alice", "ABC123");
        let serialized = serde_json::to_string(&game).unwrap();

        assert!(!serialized.contains("participant_b"));
        assert!(!serialized.contains("current_turn"));

        let deserialized: Game = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, game);
    }
}
