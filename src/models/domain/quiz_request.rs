use crate::errors::QuizError;

pub const DEFAULT_DIFFICULTY: &str = "auto";

/// Caller input for one pipeline run: a trimmed, non-empty topic and a
/// lower-cased difficulty hint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizRequest {
    topic: String,
    difficulty: String,
}

impl QuizRequest {
    pub fn new(topic: &str, difficulty: Option<&str>) -> Result<Self, QuizError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(QuizError::InvalidRequest("Missing topic".to_string()));
        }

        let difficulty = difficulty
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_DIFFICULTY)
            .to_lowercase();

        Ok(Self {
            topic: topic.to_string(),
            difficulty,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }
}
