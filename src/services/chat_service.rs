use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    services::model_service::TextModel,
};

/// Single-turn chat with the local assistant.
pub struct ChatService {
    model: Arc<dyn TextModel>,
}

impl ChatService {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    pub async fn ask(&self, message: &str) -> AppResult<String> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::ValidationError("Missing message".to_string()));
        }

        let reply = self.model.generate(message).await.map_err(|e| {
            log::error!("Chat model failed: {}", e);
            AppError::from(e)
        })?;

        Ok(reply)
    }
}
