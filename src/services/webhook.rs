// src/services/webhook.rs
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const NO_CONTENT: &str = "No content received";

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}

/// Body posted to the agent webhook.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookRequest<'a> {
    pub query: &'a str,
    pub user_id: &'a str,
    pub request_id: String,
    pub session_id: &'a str,
}

impl<'a> WebhookRequest<'a> {
    /// Each request gets its own random `request_id`.
    pub fn new(query: &'a str, user_id: &'a str, session_id: &'a str) -> Self {
        Self {
            query,
            user_id,
            request_id: Uuid::new_v4().to_string(),
            session_id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    url: String,
    auth_header: String,
}

impl WebhookClient {
    pub fn new(url: impl Into<String>, auth_header: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            auth_header: auth_header.into(),
        }
    }

    /// Ask the agent and return displayable text.
    ///
    /// Never fails: transport or decoding problems come back as `"Error: ..."`
    /// and an empty answer as [`NO_CONTENT`].
    pub async fn send(&self, query: &str, user_id: &str, session_id: &str) -> String {
        let request = WebhookRequest::new(query, user_id, session_id);
        info!(request_id = %request.request_id, session_id, "sending query to webhook");

        match self.try_send(&request).await {
            Ok(Some(content)) => content,
            Ok(None) => NO_CONTENT.to_string(),
            Err(err) => {
                warn!(request_id = %request.request_id, "webhook call failed: {}", err);
                format!("Error: {err}")
            }
        }
    }

    async fn try_send(&self, request: &WebhookRequest<'_>) -> Result<Option<String>, WebhookError> {
        let data: Value = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, self.auth_header.as_str())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await?
            .json()
            .await?;

        debug!("webhook response: {}", data);
        extract_output(&data)
    }
}

/// Pull the `output` string out of `[{"output": ...}, ...]`.
///
/// `Ok(None)` for anything that is not a non-empty array.
pub fn extract_output(data: &Value) -> Result<Option<String>, WebhookError> {
    let Some(first) = data.as_array().and_then(|items| items.first()) else {
        return Ok(None);
    };

    let first = first
        .as_object()
        .ok_or_else(|| WebhookError::UnexpectedShape(first.to_string()))?;

    let content = match first.get("output") {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => return Err(WebhookError::UnexpectedShape(other.to_string())),
    };

    // Encode and decode once more so nested escaping settles.
    let content: String = serde_json::from_str(&serde_json::to_string(&content)?)?;
    Ok(Some(content.trim().to_string()))
}
