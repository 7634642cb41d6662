//! In-process HTTP server that records form submissions.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    Router,
    extract::{RawQuery, State},
    http::{HeaderMap, Method, StatusCode, Uri, header::CONTENT_TYPE},
    routing::any,
};
use tokio::{net::TcpListener, sync::mpsc};

#[derive(Debug, Clone)]
pub struct Received {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

pub struct FormServer {
    address: SocketAddr,
    received: mpsc::UnboundedReceiver<Received>,
}

impl FormServer {
    /// Serve `/submit` (200), `/closed` (403) and `/stall` (never responds)
    /// on a random local port.
    pub async fn start() -> Self {
        let (tx, received) = mpsc::unbounded_channel();
        let app = Router::new()
            .route("/submit", any(record))
            .route("/closed", any(record))
            .route("/stall", any(stall))
            .with_state(tx);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { address, received }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.address, path)
    }

    pub async fn next(&mut self) -> Received {
        tokio::time::timeout(Duration::from_secs(5), self.received.recv())
            .await
            .expect("no submission received")
            .expect("server stopped")
    }
}

async fn record(
    State(tx): State<mpsc::UnboundedSender<Received>>,
    method: Method,
    uri: Uri,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    let status = if uri.path() == "/closed" {
        StatusCode::FORBIDDEN
    } else {
        StatusCode::OK
    };

    let _ = tx.send(Received {
        method: method.to_string(),
        path: uri.path().to_string(),
        query,
        content_type: headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body,
    });

    status
}

async fn stall() -> StatusCode {
    std::future::pending::<()>().await;
    StatusCode::OK
}

/// Local address nothing is listening on.
pub async fn unused_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Client that ignores proxy settings from the environment.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
