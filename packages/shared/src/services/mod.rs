pub mod auth_service;
pub mod draft_engine;
pub mod errors;
pub mod game_service;
pub mod invite_service;
pub mod user_service;
