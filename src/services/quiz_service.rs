use std::sync::Arc;

use crate::{
    constants::quiz_prompt::build_quiz_prompt,
    errors::QuizError,
    models::domain::{Quiz, QuizRequest},
    services::{model_service::TextModel, quiz_parser::parse_quiz},
};

/// The quiz generation pipeline. Holds no state besides the model handle, so
/// one instance serves any number of concurrent requests.
pub struct QuizService {
    model: Arc<dyn TextModel>,
}

impl QuizService {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    /// Validates the input, prompts the model once, and validates whatever
    /// comes back. Nothing is retried.
    pub async fn generate(
        &self,
        topic: &str,
        difficulty: Option<&str>,
        expected_count: usize,
    ) -> Result<Quiz, QuizError> {
        let request = QuizRequest::new(topic, difficulty)?;
        self.generate_for(&request, expected_count).await
    }

    pub async fn generate_for(
        &self,
        request: &QuizRequest,
        expected_count: usize,
    ) -> Result<Quiz, QuizError> {
        log::info!(
            "Generating {} questions on '{}' (difficulty: {})",
            expected_count,
            request.topic(),
            request.difficulty()
        );

        let prompt = build_quiz_prompt(request, expected_count);
        log::debug!("Quiz prompt: {}", prompt);

        let raw = self.model.generate(&prompt).await.map_err(|e| {
            log::error!("Quiz model invocation failed: {}", e);
            QuizError::from(e)
        })?;

        match parse_quiz(&raw, expected_count) {
            Ok(quiz) => {
                log::info!("Generated quiz with {} questions on '{}'", quiz.len(), request.topic());
                Ok(quiz)
            }
            Err(err) => {
                log::warn!("Rejected model output ({}): {}\n{}", err.code(), err, raw);
                Err(err)
            }
        }
    }
}
