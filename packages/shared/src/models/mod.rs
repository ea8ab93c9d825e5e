pub mod auth;
pub mod draft;
pub mod game;
pub mod invite;
pub mod pick;
pub mod roster;
pub mod user;
