//! Session lifecycle tests against a real server on an ephemeral port

use std::sync::Arc;

use roster_api::{AppState, create_router};
use roster_auth::JwtManager;
use roster_client::{ClientError, SessionClient};
use roster_db::Database;

/// Spawn a Roster server on an ephemeral port, returning its base URL.
///
/// `ttl_secs` controls token lifetime; a negative value issues tokens
/// that are already expired, which lets expiry paths be tested without
/// sleeping.
async fn spawn_server(ttl_secs: i64) -> (String, tempfile::NamedTempFile) {
    let file = tempfile::NamedTempFile::new().unwrap();
    let url = format!("sqlite:{}?mode=rwc", file.path().display());
    let db = Database::new(&url).await.unwrap();
    let jwt = Arc::new(JwtManager::new("test-secret-key", ttl_secs));
    let app = create_router(AppState::new(db, jwt));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), file)
}

async fn register(base_url: &str, username: &str, password: &str) {
    let response = reqwest::Client::new()
        .post(format!("{}/auth/register", base_url))
        .json(&serde_json::json!({"username": username, "password": password}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
}

#[tokio::test]
async fn test_login_stores_session() {
    let (base_url, _file) = spawn_server(3600).await;
    register(&base_url, "alice", "password123").await;

    let client = SessionClient::new(&base_url);
    assert!(!client.is_authenticated());

    client.login("alice", "password123").await.unwrap();

    assert!(client.is_authenticated());
    assert_eq!(client.username().as_deref(), Some("alice"));
    assert!(!client.is_busy());
    assert!(client.last_error().is_none());
}

#[tokio::test]
async fn test_failed_login_leaves_session_cleared() {
    let (base_url, _file) = spawn_server(3600).await;
    register(&base_url, "alice", "password123").await;

    let client = SessionClient::new(&base_url);
    let result = client.login("alice", "wrongpass1").await;

    match result {
        Err(ClientError::Server(msg)) => assert_eq!(msg, "Invalid username or password"),
        other => panic!("expected server error, got {:?}", other),
    }
    assert!(!client.is_authenticated());
    assert_eq!(
        client.last_error().as_deref(),
        Some("Invalid username or password")
    );
}

#[tokio::test]
async fn test_fetch_users_attaches_bearer_token() {
    let (base_url, _file) = spawn_server(3600).await;
    register(&base_url, "alice", "password123").await;
    register(&base_url, "bob", "password456").await;

    let client = SessionClient::new(&base_url);
    client.login("alice", "password123").await.unwrap();

    let users = client.fetch_users().await.unwrap();
    let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["alice", "bob"]);
}

#[tokio::test]
async fn test_logout_then_fetch_is_rejected() {
    let (base_url, _file) = spawn_server(3600).await;
    register(&base_url, "alice", "password123").await;

    let client = SessionClient::new(&base_url);
    client.login("alice", "password123").await.unwrap();
    client.fetch_users().await.unwrap();

    client.logout();
    assert!(!client.is_authenticated());

    // The attempt still goes out, but with no credentials to attach the
    // server answers 401 and the client stays logged out.
    let result = client.fetch_users().await;
    assert!(matches!(result, Err(ClientError::SessionExpired)));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_expired_token_clears_session() {
    // Tokens from this server are expired the moment they are issued.
    let (base_url, _file) = spawn_server(-10).await;
    register(&base_url, "alice", "password123").await;

    let client = SessionClient::new(&base_url);
    client.login("alice", "password123").await.unwrap();
    assert!(client.is_authenticated());

    let result = client.fetch_users().await;
    assert!(matches!(result, Err(ClientError::SessionExpired)));

    // Token and username go together: both are gone now.
    assert!(!client.is_authenticated());
    assert!(client.username().is_none());
}

#[tokio::test]
async fn test_fresh_client_instance_starts_unauthenticated() {
    let (base_url, _file) = spawn_server(3600).await;
    register(&base_url, "alice", "password123").await;

    let client = SessionClient::new(&base_url);
    client.login("alice", "password123").await.unwrap();
    drop(client);

    // No durable persistence: a "reload" is a new instance.
    let client = SessionClient::new(&base_url);
    assert!(!client.is_authenticated());
    assert!(matches!(
        client.fetch_users().await,
        Err(ClientError::SessionExpired)
    ));
}
