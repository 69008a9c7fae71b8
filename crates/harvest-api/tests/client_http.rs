//! HTTP-level client tests against a local stub server.
//!
//! Each test binds a loopback listener that records incoming requests and
//! answers with canned JSON, so request construction (method, path, auth
//! header placement, body) and response handling are exercised end to end
//! without touching the real services.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use harvest_api::{ApiConfig, ApiError, StorefrontClient};

// =============================================================================
// Stub Server
// =============================================================================

/// One parsed request as received on the wire.
#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Recorded {
    fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Minimal HTTP/1.1 stub: accepts connections serially, records each
/// request, and replies with whatever the routing closure returns.
/// Responses carry `Connection: close` so every request arrives on a
/// fresh connection.
struct StubApi {
    base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl StubApi {
    async fn spawn<F>(respond: F) -> Self
    where
        F: Fn(&Recorded) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                let (mut stream, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => break,
                };
                let Some(request) = read_request(&mut stream).await else {
                    continue;
                };
                let (status, body) = respond(&request);
                // Record before responding so the request is visible as
                // soon as the client call returns.
                seen.lock().unwrap().push(request);

                let response = format!(
                    "HTTP/1.1 {status} OK\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
            }
        });

        StubApi {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    fn recorded(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn read_request(stream: &mut TcpStream) -> Option<Recorded> {
    let mut raw = Vec::new();
    let mut chunk = [0u8; 1024];

    let (head_end, content_length) = loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None; // closed before a full request arrived
        }
        raw.extend_from_slice(&chunk[..n]);

        if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&raw[..pos]);
            let length = head
                .lines()
                .find_map(|line| {
                    let lower = line.to_ascii_lowercase();
                    let value = lower.strip_prefix("content-length:")?;
                    value.trim().parse::<usize>().ok()
                })
                .unwrap_or(0);
            break (pos + 4, length);
        }
    };

    while raw.len() < head_end + content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        raw.extend_from_slice(&chunk[..n]);
    }

    let head = String::from_utf8_lossy(&raw[..head_end - 4]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let headers = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();
    let body = String::from_utf8_lossy(&raw[head_end..head_end + content_length]).to_string();

    Some(Recorded {
        method,
        path,
        headers,
        body,
    })
}

fn client_for(base_url: &str) -> StorefrontClient {
    let mut config = ApiConfig::default();
    config.catalog.base_url = base_url.to_string();
    config.auth.base_url = base_url.to_string();
    StorefrontClient::new(config).unwrap()
}

// =============================================================================
// Auth Requests
// =============================================================================

#[tokio::test]
async fn login_posts_credentials_and_returns_token() {
    let stub = StubApi::spawn(|_| (200, r#"{"token": "tok-123"}"#.to_string())).await;
    let client = client_for(&stub.base_url);

    let token = client.login("shopper@example.com", "hunter2").await.unwrap();
    assert_eq!(token, "tok-123");

    let requests = stub.recorded();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/auth/login");
    assert!(requests[0].body.contains("shopper@example.com"));
}

#[tokio::test]
async fn change_password_puts_raw_token_in_authorization_header() {
    let stub = StubApi::spawn(|_| (200, r#"{"message": "updated"}"#.to_string())).await;
    let client = client_for(&stub.base_url);

    client
        .change_password("tok-123", "old-pw", "new-pw")
        .await
        .unwrap();

    let requests = stub.recorded();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].path, "/auth/change-password");

    // The token goes in verbatim, no "Bearer " scheme prefix.
    assert_eq!(requests[0].header("authorization"), Some("tok-123"));
    assert!(requests[0].body.contains("oldPassword"));
    assert!(requests[0].body.contains("newPassword"));
}

#[tokio::test]
async fn auth_rejection_surfaces_server_message() {
    let stub = StubApi::spawn(|_| (401, r#"{"message": "Invalid credentials"}"#.to_string())).await;
    let client = client_for(&stub.base_url);

    let err = client
        .login("shopper@example.com", "wrong")
        .await
        .unwrap_err();
    match err {
        ApiError::Auth(message) => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected Auth error, got {other:?}"),
    }
}

// =============================================================================
// Catalog Requests
// =============================================================================

#[tokio::test]
async fn failure_envelope_becomes_api_error() {
    let stub = StubApi::spawn(|_| {
        (
            200,
            r#"{"success": false, "message": "catalog unavailable"}"#.to_string(),
        )
    })
    .await;
    let client = client_for(&stub.base_url);

    let err = client.get_categories().await.unwrap_err();
    match err {
        ApiError::Api(message) => assert_eq!(message, "catalog unavailable"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn get_products_resolves_categories_and_skips_malformed_entries() {
    let stub = StubApi::spawn(|request| match request.path.as_str() {
        "/category" => (
            200,
            r#"{"success": true, "data": [{"id": "c1", "categoryName": "Fruits"}]}"#.to_string(),
        ),
        "/products" => (
            200,
            r#"{"success": true, "data": [
                {"id": "p1", "productName": "Organic Avocado", "price": 4.99,
                 "images": ["/images/avocado.jpg"], "categoryId": "c1"},
                {"id": "p2", "productName": "Bad Apple", "price": -1.0,
                 "images": [], "categoryId": "c1"}
            ]}"#
            .to_string(),
        ),
        other => (404, format!(r#"{{"message": "no route {other}"}}"#)),
    })
    .await;
    let client = client_for(&stub.base_url);

    let products = client.get_products().await.unwrap();

    // The negative-price entry is skipped; the good one is fully resolved.
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, "p1");
    assert_eq!(products[0].category, "Fruits");

    let paths: Vec<String> = stub.recorded().iter().map(|r| r.path.clone()).collect();
    assert_eq!(paths, vec!["/category", "/products"]);
}
