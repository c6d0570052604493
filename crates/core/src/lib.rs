//! Domain layer for the PlayHub game-hosting backend.
//!
//! Pure logic only: no database, HTTP, or filesystem access. Shared by the
//! repository layer (`playhub-db`) and the HTTP server (`playhub-api`).

pub mod assets;
pub mod catalog;
pub mod error;
pub mod roles;
pub mod slug;
pub mod types;
pub mod validation;
pub mod versioning;
