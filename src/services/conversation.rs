// src/services/conversation.rs
use tracing::{info, warn};

use crate::error::AppError;

use super::{
    normalizer::clean_markdown,
    session_manager::{ConversationStage, Message, SessionManager},
    webhook::WebhookClient,
};

/// What the client needs to redraw after one submission.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub reply: String,
    pub stage: ConversationStage,
    pub messages: Vec<Message>,
}

/// Handle one user submission: the first one is the URL, later ones are questions.
pub async fn submit(
    sessions: &SessionManager,
    webhook: &WebhookClient,
    session_id: &str,
    input: &str,
) -> Result<Exchange, AppError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    let turn = sessions.start_turn(session_id, input).await?;

    // The turn runs on its own task so a dropped request still unlocks the session.
    let sessions = sessions.clone();
    let webhook = webhook.clone();
    let session_id = session_id.to_string();
    let query = input.to_string();
    let task = tokio::spawn(async move {
        let raw = webhook.send(&query, &turn.user_id, &session_id).await;
        let reply = clean_markdown(&raw);
        match sessions.finish_turn(&session_id, &reply).await {
            Ok(session) => {
                if session.stage != turn.stage {
                    info!(%session_id, next = ?session.stage, "session stage changed");
                }
                Ok(Exchange {
                    reply,
                    stage: session.stage,
                    messages: session.messages,
                })
            }
            Err(err) => {
                warn!(%session_id, "dropping reply for closed session");
                Err(err)
            }
        }
    });

    let exchange = task
        .await
        .map_err(|err| AppError::Internal(err.to_string()))??;
    Ok(exchange)
}
