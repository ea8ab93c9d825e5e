//! The draft state machine.
//!
//! Every entry point that changes a game goes through [`DraftEngine`]. The
//! engine works on an in-memory [`Game`] and never touches storage; atomic
//! commit is the job of `GameService`. Each operation validates fully before
//! mutating, so a rejected call leaves the game exactly as it was.

use chrono::Utc;

use crate::config::DEFAULT_MAX_SKIPS;
use crate::models::game::{Game, GameStatus, Seat};
use crate::models::pick::{DraftedPlayer, Pick};
use crate::models::roster::assign_slot;
use crate::services::errors::draft_errors::DraftError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftRules {
    pub max_skips: u32,
}

impl Default for DraftRules {
    fn default() -> Self {
        DraftRules {
            max_skips: DEFAULT_MAX_SKIPS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined,
    AlreadyParticipant,
}

#[derive(Debug, Clone, Default)]
pub struct DraftEngine {
    rules: DraftRules,
}

impl DraftEngine {
    pub fn new(rules: DraftRules) -> Self {
        DraftEngine { rules }
    }

    pub fn rules(&self) -> DraftRules {
        self.rules
    }

    /// Binds the second participant and starts the draft. Participant A
    /// always drafts first. Joining a game you are already in is a no-op.
    pub fn join(&self, game: &mut Game, joiner_id: &str) -> Result<JoinOutcome, DraftError> {
        if game.is_participant(joiner_id) {
            return Ok(JoinOutcome::AlreadyParticipant);
        }
        if game.participant_b.is_some() || game.status != GameStatus::Pending {
            return Err(DraftError::GameFull);
        }

        game.participant_b = Some(joiner_id.to_string());
        game.status = GameStatus::Drafting;
        game.current_turn = Some(game.participant_a.clone());
        Ok(JoinOutcome::Joined)
    }

    pub fn accept_pick(
        &self,
        game: &mut Game,
        caller_id: &str,
        player: &DraftedPlayer,
    ) -> Result<Pick, DraftError> {
        let seat = self.check_turn(game, caller_id)?;

        if game.is_drafted(player) {
            return Err(DraftError::PlayerAlreadyDrafted(player.name.clone()));
        }
        if game.roster_full(caller_id) {
            return Err(DraftError::RosterFull);
        }
        let slot = assign_slot(player.position, &game.filled_slots(caller_id))
            .ok_or(DraftError::NoEligibleSlot(player.position))?;

        let pick = Pick {
            participant_id: caller_id.to_string(),
            slot,
            player: player.clone(),
            sequence: game.picks.len() as u32 + 1,
            created_at: Utc::now(),
        };
        game.picks.push(pick.clone());
        advance_turn(game, seat);
        Ok(pick)
    }

    pub fn accept_skip(&self, game: &mut Game, caller_id: &str) -> Result<u32, DraftError> {
        let seat = self.check_turn(game, caller_id)?;

        if game.skips_used(seat) >= self.rules.max_skips {
            return Err(DraftError::NoSkipsRemaining);
        }

        let used = match seat {
            Seat::A => {
                game.skips_used_a += 1;
                game.skips_used_a
            }
            Seat::B => {
                game.skips_used_b += 1;
                game.skips_used_b
            }
        };
        advance_turn(game, seat);
        Ok(used)
    }

    fn check_turn(&self, game: &Game, caller_id: &str) -> Result<Seat, DraftError> {
        let seat = game.seat_of(caller_id).ok_or(DraftError::NotParticipant)?;
        if game.status != GameStatus::Drafting {
            return Err(DraftError::DraftNotActive(game.status));
        }
        if !game.is_my_turn(caller_id) {
            return Err(DraftError::NotYourTurn);
        }
        Ok(seat)
    }
}

/// Hands the turn on after `actor` acted.
///
/// Completes the draft once both rosters are full. Otherwise the turn goes
/// to the opponent, unless the opponent's roster is already full, in which
/// case the actor keeps it.
fn advance_turn(game: &mut Game, actor: Seat) {
    let full = |seat: Seat| {
        game.participant(seat)
            .map(|id| game.roster_full(id))
            .unwrap_or(false)
    };
    let actor_full = full(actor);
    let opponent_full = full(actor.other());

    if actor_full && opponent_full {
        game.status = GameStatus::Complete;
        game.current_turn = None;
        return;
    }

    let next = if opponent_full { actor } else { actor.other() };
    game.current_turn = game.participant(next).map(str::to_string);
}
