use serde::Serialize;

use crate::models::domain::{Quiz, QuizQuestion};

#[derive(Debug, Clone, Serialize)]
pub struct QuizResponse {
    pub ok: bool,
    pub questions: Vec<QuizQuestion>,
}

impl From<Quiz> for QuizResponse {
    fn from(quiz: Quiz) -> Self {
        QuizResponse {
            ok: true,
            questions: quiz.into_questions(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub ok: bool,
    pub reply: String,
}

impl ChatResponse {
    pub fn new(reply: String) -> Self {
        Self { ok: true, reply }
    }
}
