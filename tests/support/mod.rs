//! In-process stand-in for the upstream statistics API.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::Value;
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

#[derive(Debug, Clone)]
struct Reply {
    status: u16,
    body: String,
}

#[derive(Debug, Default)]
struct Inner {
    replies: HashMap<String, Reply>,
    requests: Vec<String>,
}

/// Canned responses keyed by request path (query string ignored). Unknown
/// paths answer 404.
#[derive(Debug, Clone, Default)]
pub struct Upstream {
    inner: Arc<Mutex<Inner>>,
}

impl Upstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(&self, path: &str, body: Value) -> &Self {
        self.reply(path, 200, body.to_string())
    }

    pub fn status(&self, path: &str, status: u16) -> &Self {
        self.reply(path, status, String::from(r#"{"detail":"failure"}"#))
    }

    pub fn raw(&self, path: &str, body: &str) -> &Self {
        self.reply(path, 200, body.to_owned())
    }

    fn reply(&self, path: &str, status: u16, body: String) -> &Self {
        self.inner
            .lock()
            .unwrap()
            .replies
            .insert(path.to_owned(), Reply { status, body });
        self
    }

    /// Every request seen so far, as path plus query.
    pub fn requests(&self) -> Vec<String> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub async fn start(&self) -> String {
        let app = Router::new().fallback(respond).with_state(self.clone());
        serve(app).await
    }
}

async fn respond(State(upstream): State<Upstream>, uri: Uri) -> Response {
    let reply = {
        let mut inner = upstream.inner.lock().unwrap();
        inner.requests.push(
            uri.path_and_query()
                .map_or_else(|| uri.path().to_owned(), ToString::to_string),
        );
        inner.replies.get(uri.path()).cloned()
    };

    match reply {
        Some(Reply { status, body }) => (
            StatusCode::from_u16(status).unwrap(),
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn serve(app: Router) -> String {
    let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
        .serve(app.into_make_service());
    let addr = server.local_addr();
    tokio::spawn(async move {
        server.await.unwrap();
    });
    format!("http://{addr}")
}

/// Base URL of a port nothing listens on.
pub fn closed_port() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
