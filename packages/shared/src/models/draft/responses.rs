use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::game::{Game, GameStatus, Seat};
use crate::models::pick::{DraftedPlayer, Pick};
use crate::models::roster::{Slot, ROSTER_SLOTS};

/// A game as seen by one of its participants.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GameView {
    pub game_id: String,
    pub invite_code: String,
    pub participant_a: String,
    pub participant_b: Option<String>,
    pub status: GameStatus,
    pub current_turn: Option<String>,
    pub your_turn: bool,
    pub skips_used_a: u32,
    pub skips_used_b: u32,
    pub skips_remaining: u32,
    pub picks: Vec<Pick>,
    pub version: u64,
    pub updated_at: DateTime<Utc>,
}

impl GameView {
    pub fn for_participant(game: &Game, participant_id: &str, max_skips: u32) -> Self {
        let skips_remaining = game
            .seat_of(participant_id)
            .map(|seat| max_skips.saturating_sub(game.skips_used(seat)))
            .unwrap_or(0);

        GameView {
            game_id: game.game_id.clone(),
            invite_code: game.invite_code.clone(),
            participant_a: game.participant_a.clone(),
            participant_b: game.participant_b.clone(),
            status: game.status,
            current_turn: game.current_turn.clone(),
            your_turn: game.is_my_turn(participant_id),
            skips_used_a: game.skips_used_a,
            skips_used_b: game.skips_used_b,
            skips_remaining,
            picks: game.picks.clone(),
            version: game.version,
            updated_at: game.updated_at,
        }
    }
}

/// One line of a lobby listing.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GameSummary {
    pub game_id: String,
    pub status: GameStatus,
    pub opponent_id: Option<String>,
    pub your_turn: bool,
    pub updated_at: DateTime<Utc>,
}

impl GameSummary {
    pub fn for_participant(game: &Game, participant_id: &str) -> Self {
        GameSummary {
            game_id: game.game_id.clone(),
            status: game.status,
            opponent_id: game.opponent_of(participant_id).map(str::to_string),
            your_turn: game.is_my_turn(participant_id),
            updated_at: game.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RosterSlotView {
    pub slot: Slot,
    pub player: Option<DraftedPlayer>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RosterView {
    pub participant_id: String,
    pub slots: Vec<RosterSlotView>,
    pub skips_used: u32,
    pub skips_remaining: u32,
}

impl RosterView {
    pub fn build(game: &Game, seat: Seat, max_skips: u32) -> Option<Self> {
        let participant_id = game.participant(seat)?;
        let slots = ROSTER_SLOTS
            .iter()
            .map(|slot| RosterSlotView {
                slot: *slot,
                player: game
                    .picks_for(participant_id)
                    .find(|pick| pick.slot == *slot)
                    .map(|pick| pick.player.clone()),
            })
            .collect();
        let skips_used = game.skips_used(seat);

        Some(RosterView {
            participant_id: participant_id.to_string(),
            slots,
            skips_used,
            skips_remaining: max_skips.saturating_sub(skips_used),
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RostersResponse {
    pub mine: RosterView,
    pub opponent: Option<RosterView>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}
