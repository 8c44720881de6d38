//! Roster credential store
//!
//! SQLite-backed storage for user records. Records are created at
//! registration and looked up at login; they are never updated in place
//! or deleted here.

pub mod error;
pub mod models;
pub mod repository;

pub use error::DbError;
pub use models::{NewUser, User};
pub use repository::Database;
