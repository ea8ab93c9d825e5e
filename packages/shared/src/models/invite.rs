use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod requests;
pub mod responses;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InviteStatus {
    Pending,
    Accepted,
    Declined,
}

impl std::fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InviteStatus::Pending => write!(f, "PENDING"),
            InviteStatus::Accepted => write!(f, "ACCEPTED"),
            InviteStatus::Declined => write!(f, "DECLINED"),
        }
    }
}

/// A direct challenge from one user to another. The game is created up front
/// with the sender in seat A; accepting seats the receiver in seat B.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invite {
    pub invite_id: String,
    pub game_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub status: InviteStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invite {
    pub fn new(game_id: &str, sender_id: &str, receiver_id: &str) -> Self {
        let now = Utc::now();
        Invite {
            invite_id: Uuid::new_v4().to_string(),
            game_id: game_id.to_string(),
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            status: InviteStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn involves(&self, user_id: &str) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }
}
