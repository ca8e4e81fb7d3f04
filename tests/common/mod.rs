#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{Json, Router, http::HeaderMap, routing::post};
use serde_json::Value;

/// Local stand-in for the agent webhook.
pub struct FakeWebhook {
    pub url: String,
    pub received: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
}

impl FakeWebhook {
    pub fn requests(&self) -> Vec<(HeaderMap, Value)> {
        self.received.lock().unwrap().clone()
    }
}

pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Webhook that records every request and always answers with `reply`.
pub async fn spawn_webhook(reply: Value) -> FakeWebhook {
    spawn_slow_webhook(reply, Duration::ZERO).await
}

/// Like [`spawn_webhook`], but waits `delay` before answering.
pub async fn spawn_slow_webhook(reply: Value, delay: Duration) -> FakeWebhook {
    let received = Arc::new(Mutex::new(Vec::new()));
    let log = received.clone();

    let app = Router::new().route(
        "/hook",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let log = log.clone();
            let reply = reply.clone();
            async move {
                log.lock().unwrap().push((headers, body));
                tokio::time::sleep(delay).await;
                Json(reply)
            }
        }),
    );

    let base = serve(app).await;
    FakeWebhook {
        url: format!("{base}/hook"),
        received,
    }
}

/// Webhook answering with a body that is not JSON.
pub async fn spawn_text_webhook(body: &'static str) -> String {
    let app = Router::new().route("/hook", post(move || async move { body }));
    format!("{}/hook", serve(app).await)
}

/// URL of a port nothing listens on.
pub async fn closed_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/hook")
}
