pub mod auth_service_errors;
pub mod draft_errors;
pub mod error_kind;
pub mod game_service_errors;
pub mod invite_service_errors;
pub mod user_service_errors;
