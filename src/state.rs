// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::session_manager::SessionManager;
use crate::services::translator::{GoogleTranslator, Translate};
use crate::services::webhook::WebhookClient;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub sessions: SessionManager,
    pub webhook: WebhookClient,
    pub translator: Arc<dyn Translate>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self::with_translator(config, Arc::new(GoogleTranslator::new(&config.translate_url)))
    }

    pub fn with_translator(config: &Config, translator: Arc<dyn Translate>) -> Self {
        Self {
            sessions: SessionManager::new(config.session_ttl, config.user_id.clone()),
            webhook: WebhookClient::new(&config.webhook_url, &config.auth_header),
            translator,
        }
    }
}
