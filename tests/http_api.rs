//! HTTP front end tests.
//!
//! Each test serves the router on an ephemeral port and talks to it with a
//! real client.

mod helpers;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use record_batcher::{serve, AppState, BufferEngine, FlushStats, Record};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use helpers::base_url;

struct TestServer {
    addr: SocketAddr,
    engine: Arc<BufferEngine<Record>>,
    shutdown: CancellationToken,
    task: JoinHandle<anyhow::Result<()>>,
}

async fn start_test_server(shard_count: usize) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let engine = Arc::new(BufferEngine::new(shard_count).expect("valid shard count"));
    let state = AppState::new(Arc::clone(&engine), Arc::new(FlushStats::new()));
    let shutdown = CancellationToken::new();
    let task = tokio::spawn(serve(listener, state, shutdown.clone()));
    TestServer {
        addr,
        engine,
        shutdown,
        task,
    }
}

impl TestServer {
    async fn stop(self) {
        self.shutdown.cancel();
        tokio::time::timeout(Duration::from_secs(5), self.task)
            .await
            .expect("server should stop")
            .expect("server task")
            .expect("server result");
    }
}

#[tokio::test]
async fn test_ping_accepts_record() {
    let server = start_test_server(4).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/ping", base_url(server.addr)))
        .json(&json!({ "name": "alice" }))
        .send()
        .await
        .expect("Request should succeed");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("JSON body");
    assert_eq!(body, json!({ "message": "pong" }));
    assert_eq!(server.engine.pending(), 1);

    server.stop().await;
}

#[tokio::test]
async fn test_ping_rejects_malformed_body() {
    let server = start_test_server(4).await;
    let client = reqwest::Client::new();
    let url = format!("{}/ping", base_url(server.addr));

    let not_json = client
        .post(&url)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Request should succeed");
    assert_eq!(not_json.status(), 400);

    let wrong_shape = client
        .post(&url)
        .json(&json!({ "name": 42 }))
        .send()
        .await
        .expect("Request should succeed");
    assert_eq!(wrong_shape.status(), 400);

    let no_content_type = client
        .post(&url)
        .body(r#"{"name":"bob"}"#)
        .send()
        .await
        .expect("Request should succeed");
    assert_eq!(no_content_type.status(), 400);

    assert_eq!(server.engine.pending(), 0);
    server.stop().await;
}

#[tokio::test]
async fn test_ping_returns_503_once_engine_disabled() {
    let server = start_test_server(2).await;
    server.engine.disable();

    let response = reqwest::Client::new()
        .post(format!("{}/ping", base_url(server.addr)))
        .json(&json!({ "name": "late" }))
        .send()
        .await
        .expect("Request should succeed");

    assert_eq!(response.status(), 503);
    let body: Value = response.json().await.expect("JSON body");
    assert_eq!(body, json!({ "error": "engine disabled" }));
    assert_eq!(server.engine.pending(), 0);

    server.stop().await;
}

#[tokio::test]
async fn test_status_reports_buffer_state() {
    let server = start_test_server(8).await;
    server
        .engine
        .push(Record::new("queued"))
        .expect("engine enabled");

    let body: Value = reqwest::get(format!("{}/status", base_url(server.addr)))
        .await
        .expect("Request should succeed")
        .json()
        .await
        .expect("JSON body");

    assert_eq!(body["enabled"], json!(true));
    assert_eq!(body["shard_count"], json!(8));
    assert_eq!(body["pending_records"], json!(1));
    assert_eq!(body["flushes"]["records_flushed"], json!(0));
    assert!(body["uptime_seconds"].is_number());

    server.stop().await;
}
