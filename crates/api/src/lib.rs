//! PlayHub API server library.
//!
//! Exposes the building blocks (config, state, error handling, storage,
//! routes) so integration tests and the binary entrypoint can both access
//! them.

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod publish;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod storage;
