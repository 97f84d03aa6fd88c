//! Helpers shared by the integration tests: an in-process server on an
//! ephemeral port and a thin WebSocket client.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use sajiki_server::{
    bootstrap::build_app_state, infrastructure::dto::websocket::ServerEvent, ui::Server,
};
use sajiki_shared::time::SystemClock;
use serde_json::Value;
use tokio::{net::TcpStream, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

/// How long to wait for an expected frame
pub const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// How long to listen before concluding that nothing is coming
pub const SILENCE: Duration = Duration::from_millis(200);

/// Start a server bound to 127.0.0.1 on an ephemeral port
pub async fn spawn_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    let router = Server::new(build_app_state(Arc::new(SystemClock))).into_router();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });

    addr
}

/// WebSocket client speaking the session protocol
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    pub async fn connect(addr: SocketAddr) -> Self {
        let (stream, _) = connect_async(format!("ws://{}/ws", addr))
            .await
            .expect("Failed to connect");
        Self { stream }
    }

    /// Connect and join, consuming the frames the join itself produces
    /// (announcement, replays, user-count)
    pub async fn join(addr: SocketAddr, username: &str) -> Self {
        let mut client = Self::connect(addr).await;
        client
            .send(serde_json::json!({"type": "join", "username": username}))
            .await;
        client
            .recv_until(|event| matches!(event, ServerEvent::UserCount { .. }))
            .await;
        client
    }

    pub async fn send(&mut self, value: Value) {
        self.send_raw(&value.to_string()).await;
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    /// Next server event, failing the test on timeout
    pub async fn recv(&mut self) -> ServerEvent {
        timeout(RECV_TIMEOUT, self.next_event())
            .await
            .expect("Timed out waiting for a frame")
    }

    /// Receive events until one matches, returning everything received
    pub async fn recv_until(&mut self, done: impl Fn(&ServerEvent) -> bool) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        loop {
            let event = self.recv().await;
            let finished = done(&event);
            events.push(event);
            if finished {
                return events;
            }
        }
    }

    /// Assert that nothing arrives for a short while
    pub async fn expect_silence(&mut self) {
        if let Ok(event) = timeout(SILENCE, self.next_event()).await {
            panic!("Expected no frame, got {:?}", event);
        }
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }

    async fn next_event(&mut self) -> ServerEvent {
        loop {
            let msg = self
                .stream
                .next()
                .await
                .expect("Connection closed")
                .expect("WebSocket error");
            if let Message::Text(text) = msg {
                return serde_json::from_str(text.as_str()).expect("Unparseable server frame");
            }
        }
    }
}
