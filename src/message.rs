// src/message.rs
use serde::{Deserialize, Serialize};

use crate::services::render::render_markdown;
use crate::services::session_manager::{ConversationStage, Message, MessageRole};

#[derive(Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub reply: String,
    pub stage: ConversationStage,
    pub messages: Vec<TranscriptEntry>,
}

/// Whole transcript, returned so the page can redraw from scratch.
#[derive(Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: String,
    pub stage: ConversationStage,
    pub messages: Vec<TranscriptEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: String,
    pub content: String,
    /// `content` rendered from markdown, raw HTML kept.
    pub html: String,
}

impl From<&Message> for TranscriptEntry {
    fn from(message: &Message) -> Self {
        let role = match message.role {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };
        Self {
            role: role.to_string(),
            content: message.content.clone(),
            html: render_markdown(&message.content),
        }
    }
}

pub fn transcript(messages: &[Message]) -> Vec<TranscriptEntry> {
    messages.iter().map(TranscriptEntry::from).collect()
}

#[derive(Deserialize)]
pub struct TranslateRequest {
    pub text: String,
}

#[derive(Serialize, Deserialize)]
pub struct TranslateResponse {
    pub text: String,
    pub translated: bool,
    pub warning: Option<String>,
}
