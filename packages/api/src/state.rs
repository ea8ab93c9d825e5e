use std::sync::Arc;

use draft_shared::services::auth_service::AuthService;
use draft_shared::services::game_service::GameService;
use draft_shared::services::invite_service::InviteService;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub game_service: Arc<GameService>,
    pub invite_service: Arc<InviteService>,
}
