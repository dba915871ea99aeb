//! Notifier behavior against a local one-shot HTTP peer

use luxe_notify::WebhookNotifier;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Read one HTTP request off the stream: returns (request head, body).
async fn read_request(stream: &mut TcpStream) -> (String, String) {
    let mut buf: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "peer closed before a full request arrived");
        buf.extend_from_slice(&chunk[..n]);

        let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())?
            })
            .unwrap_or(0);

        let body_start = header_end + 4;
        if buf.len() >= body_start + content_length {
            let body =
                String::from_utf8_lossy(&buf[body_start..body_start + content_length]).to_string();
            return (head, body);
        }
    }
}

async fn respond(stream: &mut TcpStream, status: &str, content_type: Option<&str>, body: &str) {
    let mut response = format!(
        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n",
        body.len()
    );
    if let Some(content_type) = content_type {
        response.push_str(&format!("Content-Type: {content_type}\r\n"));
    }
    response.push_str("\r\n");
    response.push_str(body);

    stream.write_all(response.as_bytes()).await.unwrap();
}

/// Accept exactly one connection, answer it, and hand back what arrived.
fn serve_one(
    listener: TcpListener,
    status: &'static str,
    content_type: Option<&'static str>,
    body: &'static str,
) -> JoinHandle<(String, String)> {
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;
        respond(&mut stream, status, content_type, body).await;
        request
    })
}

fn notifier_for(addr: std::net::SocketAddr) -> WebhookNotifier {
    WebhookNotifier::with_endpoints(
        &format!("http://{}/webhook/create_session", addr),
        &format!("http://{}/webhook/attach_session", addr),
    )
    .unwrap()
}

#[tokio::test]
async fn create_session_posts_payload_and_returns_parsed_ack() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = serve_one(
        listener,
        "200 OK",
        Some("application/json"),
        r#"{"ok":true,"recorded":true}"#,
    );

    let ack = notifier_for(addr)
        .post_create_session("abc123", Some("u1"), Some("e@x.com"))
        .await;

    let (head, body) = server.await.unwrap();

    assert!(head.starts_with("POST /webhook/create_session HTTP/1.1"));
    assert!(head.to_lowercase().contains("content-type: application/json"));
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "sessionId": "abc123", "userId": "u1", "email": "e@x.com" })
    );

    assert_eq!(ack, json!({ "ok": true, "recorded": true }));
}

#[tokio::test]
async fn attach_session_posts_payload_to_attach_endpoint() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = serve_one(
        listener,
        "200 OK",
        Some("application/json"),
        r#"{"ok":true}"#,
    );

    let ack = notifier_for(addr)
        .attach_session("old1", "new1", "e@x.com")
        .await;

    let (head, body) = server.await.unwrap();

    assert!(head.starts_with("POST /webhook/attach_session HTTP/1.1"));
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({
            "oldSessionId": "old1",
            "newSessionId": "new1",
            "email": "e@x.com"
        })
    );

    assert_eq!(ack, json!({ "ok": true }));
}

#[tokio::test]
async fn non_json_response_body_becomes_status_ack() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = serve_one(listener, "200 OK", Some("text/plain"), "recorded");

    let ack = notifier_for(addr).post_create_session("abc123", None, None).await;

    let (_, body) = server.await.unwrap();

    // Absent optionals go over the wire as explicit nulls
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "sessionId": "abc123", "userId": null, "email": null })
    );

    assert_eq!(ack, json!({ "ok": true }));
}

#[tokio::test]
async fn failing_status_with_non_json_body_becomes_false_ack() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = serve_one(listener, "502 Bad Gateway", None, "upstream down");

    let ack = notifier_for(addr)
        .attach_session("old1", "new1", "e@x.com")
        .await;

    server.await.unwrap();

    assert_eq!(ack, json!({ "ok": false }));
}

#[tokio::test]
async fn transport_failure_folds_into_ack() {
    // Bind, grab the port, then close it again so the connect is refused
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let ack = notifier_for(addr)
        .post_create_session("abc123", Some("u1"), Some("e@x.com"))
        .await;

    assert_eq!(ack["ok"], json!(false));
    let error = ack["error"].as_str().unwrap();
    assert!(!error.is_empty());
}
