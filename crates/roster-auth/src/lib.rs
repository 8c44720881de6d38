//! Roster Authentication
//!
//! This crate provides password hashing and JWT-based authentication
//! for the Roster user-list service.

pub mod error;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use error::AuthError;
pub use jwt::{Claims, JwtManager};
pub use middleware::{AuthUser, auth_middleware};
pub use password::{DUMMY_HASH, hash_password, verify_password};
