use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JoinByCodeRequest {
    pub invite_code: String,
}

/// A player as submitted by the client. The position is kept as a raw label
/// and parsed by the service so an unknown label is reported as a validation
/// error rather than a body rejection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerRequest {
    pub name: String,
    pub team: String,
    pub position: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmitPickRequest {
    pub player: PlayerRequest,
}
