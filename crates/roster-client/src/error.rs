//! Client error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// A login request is already outstanding; the UI should disable
    /// resubmission instead of firing a second concurrent attempt.
    #[error("A login request is already in flight")]
    LoginInFlight,

    /// The server rejected the stored credentials; session state has been
    /// cleared and the user must log in again.
    #[error("Session expired, please log in again")]
    SessionExpired,

    /// Error message as returned by the server
    #[error("{0}")]
    Server(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
