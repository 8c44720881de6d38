//! Client-side session lifecycle

use parking_lot::Mutex;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::ClientError;

/// An authenticated session: the bearer token and the display username.
///
/// The two travel as one value so they can only ever be set or cleared
/// together. The token is treated as opaque; the client never parses it.
#[derive(Debug, Clone)]
struct Session {
    token: String,
    username: String,
}

#[derive(Default)]
struct SessionState {
    session: Option<Session>,
    busy: bool,
    last_error: Option<String>,
}

/// Login response from the server
#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    #[allow(dead_code)]
    expires_in: i64,
    username: String,
}

/// Error body from the server
#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// A user entry from the protected list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub created_at: String,
}

/// Session client for a Roster server
///
/// Session state lives only as long as this instance; a restart always
/// begins unauthenticated.
pub struct SessionClient {
    http: reqwest::Client,
    base_url: String,
    state: Mutex<SessionState>,
}

impl SessionClient {
    /// Create a new, unauthenticated client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Whether a session is currently held
    pub fn is_authenticated(&self) -> bool {
        self.state.lock().session.is_some()
    }

    /// Username of the authenticated identity, if any
    pub fn username(&self) -> Option<String> {
        self.state.lock().session.as_ref().map(|s| s.username.clone())
    }

    /// Whether a login request is outstanding
    pub fn is_busy(&self) -> bool {
        self.state.lock().busy
    }

    /// Error message from the most recent failed login, if any
    pub fn last_error(&self) -> Option<String> {
        self.state.lock().last_error.clone()
    }

    /// Submit credentials to the server.
    ///
    /// While the request is outstanding the client is `busy` and further
    /// login attempts are rejected rather than fired concurrently. On
    /// success the session is stored; on failure it stays cleared and the
    /// failure message replaces any earlier one.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        {
            let mut state = self.state.lock();
            if state.busy {
                return Err(ClientError::LoginInFlight);
            }
            state.busy = true;
        }

        let result = self.submit_login(username, password).await;

        let mut state = self.state.lock();
        state.busy = false;
        match result {
            Ok(session) => {
                info!("Logged in as {}", session.username);
                state.last_error = None;
                state.session = Some(session);
                Ok(())
            }
            Err(e) => {
                state.session = None;
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn submit_login(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        let response = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(ClientError::Server(read_error_message(response).await));
        }

        let body: LoginResponse = response.json().await?;
        Ok(Session {
            token: body.token,
            username: body.username,
        })
    }

    /// Fetch the protected user list.
    ///
    /// The bearer token is read from the current session state at call
    /// time. A 401 or 403 from the server clears the session so the UI
    /// falls back to the login view.
    pub async fn fetch_users(&self) -> Result<Vec<UserSummary>, ClientError> {
        let token = self.state.lock().session.as_ref().map(|s| s.token.clone());

        let mut request = self.http.get(format!("{}/api/users", self.base_url));
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!("Server rejected stored credentials, clearing session");
                self.state.lock().session = None;
                Err(ClientError::SessionExpired)
            }
            _ => Err(ClientError::Server(read_error_message(response).await)),
        }
    }

    /// Discard the session unconditionally
    pub fn logout(&self) {
        let mut state = self.state.lock();
        state.session = None;
        state.last_error = None;
        debug!("Logged out");
    }
}

async fn read_error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => format!("Unexpected response: {}", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_client_starts_unauthenticated() {
        let client = SessionClient::new("http://localhost:9");
        assert!(!client.is_authenticated());
        assert!(client.username().is_none());
        assert!(!client.is_busy());
        assert!(client.last_error().is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_replaces_stale_error() {
        // Port 1 refuses connections, so the request fails at transport
        // level before any server response.
        let client = SessionClient::new("http://127.0.0.1:1");
        client.state.lock().last_error = Some("Invalid username or password".to_string());

        let result = client.login("alice", "password123").await;
        assert!(matches!(result, Err(ClientError::Http(_))));

        let last_error = client.last_error().unwrap();
        assert_ne!(last_error, "Invalid username or password");
        assert!(last_error.starts_with("HTTP error"));
    }

    #[tokio::test]
    async fn test_login_rejected_while_busy() {
        let client = SessionClient::new("http://localhost:9");
        client.state.lock().busy = true;

        let result = client.login("alice", "password123").await;
        assert!(matches!(result, Err(ClientError::LoginInFlight)));
    }

    #[test]
    fn test_logout_clears_everything() {
        let client = SessionClient::new("http://localhost:9");
        {
            let mut state = client.state.lock();
            state.session = Some(Session {
                token: "tok".to_string(),
                username: "alice".to_string(),
            });
            state.last_error = Some("old error".to_string());
        }

        client.logout();
        assert!(!client.is_authenticated());
        assert!(client.last_error().is_none());
    }
}
