//! Row models and input DTOs, one module per table.

pub mod game;
pub mod game_version;
pub mod role;
pub mod score;
pub mod session;
pub mod user;
