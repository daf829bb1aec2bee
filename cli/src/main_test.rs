use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use super::*;

const VALID_MANAGER: &str = "h.eyJleHAiOjQxMDI0NDQ4MDAsImlkIjoidTEiLCJyb2xlIjoibWFuYWdlciJ9.s";
const EXPIRED_MANAGER: &str = "h.eyJleHAiOjEwMDAsImlkIjoidTEiLCJyb2xlIjoibWFuYWdlciJ9.s";
const NOW: f64 = 2000.0;

fn restored(access_token: Option<&str>, refresh_token: Option<&str>) -> SessionSnapshot {
    SessionSnapshot {
        access_token: access_token.map(str::to_owned),
        refresh_token: refresh_token.map(str::to_owned),
        user: None,
        is_loading: false,
        phase: if access_token.is_some() { SessionPhase::Restoring } else { SessionPhase::Anonymous },
    }
}

#[test]
fn status_of_empty_session() {
    assert_eq!(
        status_json(&restored(None, None), NOW),
        json!({ "phase": "anonymous", "accessToken": "absent", "hasRefreshToken": false, "user": null })
    );
}

#[test]
fn status_decodes_valid_token_locally() {
    assert_eq!(
        status_json(&restored(Some(VALID_MANAGER), Some("r1")), NOW),
        json!({
            "phase": "restoring",
            "accessToken": "valid",
            "hasRefreshToken": true,
            "user": { "id": "u1", "role": "manager", "buildingId": null },
        })
    );
}

#[test]
fn status_reports_expired_and_malformed_without_user() {
    let expired = status_json(&restored(Some(EXPIRED_MANAGER), Some("r1")), NOW);
    assert_eq!(expired["accessToken"], "expired");
    assert_eq!(expired["user"], Value::Null);

    let malformed = status_json(&restored(Some("garbage"), None), NOW);
    assert_eq!(malformed["accessToken"], "malformed");
    assert_eq!(malformed["user"], Value::Null);
}

#[test]
fn status_never_prints_token_values() {
    let rendered = status_json(&restored(Some(VALID_MANAGER), Some("r1-secret")), NOW).to_string();
    assert!(!rendered.contains(VALID_MANAGER));
    assert!(!rendered.contains("r1-secret"));
}

#[test]
fn cli_parses_register_role_and_defaults() {
    let cli = Cli::try_parse_from([
        "bms-cli",
        "--api-origin",
        "http://127.0.0.1:9",
        "register",
        "--email",
        "a@b.com",
        "--password",
        "longenough",
        "--role",
        "building_admin",
    ])
    .unwrap();
    assert_eq!(cli.api_origin, "http://127.0.0.1:9");
    assert_eq!(cli.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert!(matches!(cli.command, Command::Register { role: Role::BuildingAdmin, .. }));
}

#[test]
fn cli_rejects_unknown_role() {
    let parsed = Cli::try_parse_from(["bms-cli", "register", "--email", "a@b.com", "--password", "x", "--role", "janitor"]);
    assert!(parsed.is_err());
}

#[tokio::test]
async fn logout_without_session_queues_no_revoke() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("session.json"));
    let backend = ReqwestBackend::new("http://127.0.0.1:9", Duration::from_millis(50));
    let session = SessionManager::new(store, backend.clone(), SystemClock, QueueSpawner::new());

    run(&session, &backend, Command::Logout).await.unwrap();
    assert_eq!(session.spawner().pending(), 0);
}

#[tokio::test]
async fn logout_clears_file_and_queues_one_revoke() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, format!(r#"{{"accessToken":"{VALID_MANAGER}","refreshToken":"r1"}}"#)).unwrap();
    let backend = ReqwestBackend::new("http://127.0.0.1:9", Duration::from_millis(50));
    let session = SessionManager::new(FileStore::new(&path), backend.clone(), SystemClock, QueueSpawner::new());

    run(&session, &backend, Command::Logout).await.unwrap();
    assert!(!path.exists());
    assert_eq!(session.spawner().pending(), 1);
    // Revoke fails against a closed port; the failure is swallowed.
    session.spawner().drain().await;
}

#[tokio::test]
async fn register_enforces_min_password_length_before_any_request() {
    let backend = ReqwestBackend::new("http://127.0.0.1:9", Duration::from_millis(50));
    let dir = tempfile::tempdir().unwrap();
    let session =
        SessionManager::new(FileStore::new(dir.path().join("s.json")), backend.clone(), SystemClock, QueueSpawner::new());

    let err = run(
        &session,
        &backend,
        Command::Register { email: "a@b.com".to_owned(), password: "short".to_owned(), role: Role::Resident },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CliError::PasswordTooShort));
}

/// Answer a single request with `200 OK` and `body`, returning the origin.
async fn answer_once(body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0_u8; 4096];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn login_settles_a_restored_session() {
    let origin = answer_once(format!(r#"{{"accessToken":"{VALID_MANAGER}","refreshToken":"r1"}}"#)).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let backend = ReqwestBackend::new(&origin, Duration::from_secs(5));
    let session = SessionManager::new(FileStore::new(&path), backend.clone(), SystemClock, QueueSpawner::new());

    run(&session, &backend, Command::Login { email: " a@b.com ".to_owned(), password: "pw".to_owned() })
        .await
        .unwrap();

    let snapshot = session.snapshot();
    assert!(!snapshot.is_loading);
    assert_eq!(snapshot.phase, SessionPhase::Authenticated);
    assert_eq!(snapshot.user.map(|u| u.role), Some(Role::Manager));
    assert!(path.exists());
}
