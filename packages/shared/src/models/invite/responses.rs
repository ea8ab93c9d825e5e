use serde::{Deserialize, Serialize};

use crate::models::draft::responses::GameView;
use crate::models::invite::Invite;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct InviteSentResponse {
    pub invite: Invite,
    pub game: GameView,
}
