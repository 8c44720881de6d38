//! Roster session client
//!
//! Drives login against a Roster server and holds the resulting bearer
//! token in memory for the lifetime of the client instance. A new
//! instance always starts unauthenticated; nothing is persisted.

pub mod error;
pub mod session;

pub use error::ClientError;
pub use session::{SessionClient, UserSummary};
