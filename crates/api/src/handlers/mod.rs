pub mod admin;
pub mod auth;
pub mod games;
pub mod scores;
pub mod uploads;
pub mod users;
