pub mod errors;
pub mod game_repository;
pub mod in_memory;
pub mod invite_repository;
pub mod user_repository;
