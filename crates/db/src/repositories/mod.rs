//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! a `&PgPool` (or, for steps that must share a transaction, any
//! [`sqlx::PgExecutor`]) as the first argument.

pub mod game_repo;
pub mod game_version_repo;
pub mod role_repo;
pub mod score_repo;
pub mod session_repo;
pub mod user_repo;

pub use game_repo::GameRepo;
pub use game_version_repo::GameVersionRepo;
pub use role_repo::RoleRepo;
pub use score_repo::ScoreRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
