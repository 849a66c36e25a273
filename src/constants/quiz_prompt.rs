use crate::models::domain::QuizRequest;

pub const QUIZ_SYSTEM_ROLE: &str =
    "You are an assistant that generates educational multiple-choice quizzes.";

/// Builds the single instruction sent to the model. The prompt is the only
/// steering mechanism: no examples, no constrained decoding.
pub fn build_quiz_prompt(request: &QuizRequest, question_count: usize) -> String {
    format!(
        "{role}
Produce exactly {count} questions on \"{topic}\".
Each question must be a JSON object with these fields:
  - \"question\": string
  - \"options\": array of 4 strings
  - \"answer\": integer index of the correct option (0-3)
  - \"explanation\": short string
Difficulty: {difficulty}
Output STRICT JSON: an array of exactly {count} objects.
Do NOT output anything else: no prose, no commentary, no markdown code fences.",
        role = QUIZ_SYSTEM_ROLE,
        count = question_count,
        topic = request.topic(),
        difficulty = request.difficulty(),
    )
}
