//! Well-known role name constants.
//!
//! Names and ids must match the seed data in `20260301000001_create_roles_and_users.sql`.

pub const ROLE_ADMIN: &str = "admin";

/// Role id assigned to accounts created through sign-up.
pub const DEFAULT_ROLE_ID: i64 = 2;
