use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use crate::{
    error::AppError,
    message::{
        ChatRequest, ChatResponse, SessionView, TranslateRequest, TranslateResponse, transcript,
    },
    services::{
        conversation::submit,
        language::looks_portuguese,
        translator::translate_text,
    },
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session_id = match &payload.session_id {
        Some(s) if !s.trim().is_empty() => state.sessions.ensure_session(s).await,
        _ => state.sessions.create_session().await,
    };

    let exchange = submit(&state.sessions, &state.webhook, &session_id, &payload.message).await?;

    Ok(Json(ChatResponse {
        session_id,
        reply: exchange.reply,
        stage: exchange.stage,
        messages: transcript(&exchange.messages),
    }))
}

pub async fn create_session_handler(State(state): State<SharedState>) -> Json<SessionView> {
    let session_id = state.sessions.create_session().await;
    info!(%session_id, "session created");
    Json(SessionView {
        session_id,
        stage: Default::default(),
        messages: Vec::new(),
    })
}

pub async fn get_session_handler(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    let session = state
        .sessions
        .snapshot(&session_id)
        .await
        .ok_or(AppError::SessionNotFound(session_id))?;

    Ok(Json(SessionView {
        messages: transcript(&session.messages),
        stage: session.stage,
        session_id: session.id,
    }))
}

pub async fn delete_session_handler(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove_session(&session_id).await {
        info!(%session_id, "session closed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::SessionNotFound(session_id))
    }
}

pub async fn translate_handler(
    State(state): State<SharedState>,
    Json(payload): Json<TranslateRequest>,
) -> Json<TranslateResponse> {
    if looks_portuguese(&payload.text) {
        return Json(TranslateResponse {
            text: payload.text,
            translated: false,
            warning: None,
        });
    }

    let translation = translate_text(state.translator.as_ref(), &payload.text).await;
    Json(TranslateResponse {
        translated: translation.error.is_none(),
        text: translation.text,
        warning: translation.error,
    })
}
