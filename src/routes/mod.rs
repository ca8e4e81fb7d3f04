// src/routes/mod.rs
pub mod chat;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::{
    chat_handler, create_session_handler, delete_session_handler, get_session_handler,
    translate_handler,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/session", post(create_session_handler))
        .route(
            "/session/{id}",
            get(get_session_handler).delete(delete_session_handler),
        )
        .route("/translate", post(translate_handler))
        .route("/health", get(|| async { "OK" }))
        .fallback_service(ServeDir::new("public"))
        .layer(TraceLayer::new_for_http())
}
