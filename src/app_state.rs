use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    services::{
        chat_service::ChatService,
        model_service::{OpenAiCompatibleModel, TextModel},
        ollama_service::OllamaModel,
        quiz_service::QuizService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub chat_service: Arc<ChatService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let quiz_model = Arc::new(OpenAiCompatibleModel::from_config(&config)?);
        log::info!("Quiz model: {}", quiz_model.model_name());

        let chat_model = Arc::new(OllamaModel::from_config(&config));

        Ok(Self::with_models(config, quiz_model, chat_model))
    }

    /// Wires the services around caller-supplied collaborators.
    pub fn with_models(
        config: Config,
        quiz_model: Arc<dyn TextModel>,
        chat_model: Arc<dyn TextModel>,
    ) -> Self {
        Self {
            quiz_service: Arc::new(QuizService::new(quiz_model)),
            chat_service: Arc::new(ChatService::new(chat_model)),
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_app_state_builds_from_test_config() {
        let state = AppState::new(Config::test_config()).unwrap();
        assert_eq!(state.config.web_question_count, 5);
    }

    #[test]
    fn test_app_state_requires_api_key() {
        let config = Config {
            gemini_api_key: None,
            ..Config::test_config()
        };
        assert!(AppState::new(config).is_err());
    }
}
