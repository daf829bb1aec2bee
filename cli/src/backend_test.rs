use super::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve one connection with a canned HTTP response and return the origin.
async fn one_shot_server(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0_u8; 4096];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}")
}

/// Accept connections but never answer.
async fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn refresh_returns_new_access_token() {
    let origin = one_shot_server("200 OK", r#"{"accessToken":"fresh"}"#).await;
    let backend = ReqwestBackend::new(&origin, Duration::from_secs(5));
    assert_eq!(backend.refresh("r1").await, Ok("fresh".to_owned()));
}

#[tokio::test]
async fn refresh_rejection_carries_status_and_message() {
    let origin = one_shot_server("401 Unauthorized", r#"{"message":"refresh token revoked"}"#).await;
    let backend = ReqwestBackend::new(&origin, Duration::from_secs(5));
    assert_eq!(
        backend.refresh("r1").await,
        Err(AuthError::Rejected { status: 401, message: "refresh token revoked".to_owned() })
    );
}

#[tokio::test]
async fn refresh_times_out_against_silent_server() {
    let origin = silent_server().await;
    let timeout = Duration::from_millis(150);
    let backend = ReqwestBackend::new(&origin, timeout);
    assert_eq!(backend.refresh("r1").await, Err(AuthError::Timeout(timeout)));
}

#[tokio::test]
async fn refresh_with_unexpected_body_is_a_decode_error() {
    let origin = one_shot_server("200 OK", r#"{"token":"wrong-field"}"#).await;
    let backend = ReqwestBackend::new(&origin, Duration::from_secs(5));
    assert!(matches!(backend.refresh("r1").await, Err(AuthError::Decode(_))));
}

#[tokio::test]
async fn login_failure_falls_back_to_generic_message() {
    let origin = one_shot_server("400 Bad Request", "").await;
    let backend = ReqwestBackend::new(&origin, Duration::from_secs(5));
    let err = backend.login("a@b.com", "pw").await.unwrap_err();
    assert_eq!(err.user_message(), "Login failed");
}

#[tokio::test]
async fn login_parses_token_pair() {
    let origin = one_shot_server("200 OK", r#"{"accessToken":"a1","refreshToken":"r1"}"#).await;
    let backend = ReqwestBackend::new(&origin, Duration::from_secs(5));
    assert_eq!(
        backend.login("a@b.com", "pw").await,
        Ok(TokenPair { access_token: "a1".to_owned(), refresh_token: "r1".to_owned() })
    );
}

#[tokio::test]
async fn revoke_failure_is_reported_not_panicked() {
    let origin = one_shot_server("500 Internal Server Error", "{}").await;
    let backend = ReqwestBackend::new(&origin, Duration::from_secs(5));
    assert!(matches!(backend.revoke("r1".to_owned()).await, Err(AuthError::Rejected { status: 500, .. })));
}

#[test]
fn origin_trailing_slash_is_trimmed() {
    let backend = ReqwestBackend::new("https://iam.example/", Duration::from_secs(1));
    assert_eq!(backend.url(endpoints::ME), "https://iam.example/iam/me");
}
