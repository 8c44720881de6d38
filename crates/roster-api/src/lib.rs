//! Roster REST API
//!
//! This crate provides the Axum-based HTTP API for Roster: public
//! registration and login endpoints, and a JWT-protected user list.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
