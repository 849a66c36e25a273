use serde::{Deserialize, Serialize};

/// The keys every generated question object has to carry.
pub const REQUIRED_FIELDS: [&str; 4] = ["question", "options", "answer", "explanation"];

/// Options the prompt asks for. More are tolerated, fewer are rejected.
pub const OPTION_COUNT: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: usize, // index into options
    pub explanation: String,
}

impl QuizQuestion {
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.answer).map(String::as_str)
    }

    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_question() -> QuizQuestion {
        QuizQuestion {
            question: "Which planet is closest to the sun?".to_string(),
            options: vec![
                "Venus".to_string(),
                "Mercury".to_string(),
                "Earth".to_string(),
                "Mars".to_string(),
            ],
            answer: 1,
            explanation: "Mercury orbits closest to the sun.".to_string(),
        }
    }

    #[test]
    fn correct_option_follows_answer_index() {
        let question = sample_question();

        assert_eq!(question.correct_option(), Some("Mercury"));
        assert!(question.is_correct(1));
        assert!(!question.is_correct(0));
    }

    #[test]
    fn correct_option_is_none_when_answer_out_of_range() {
        let question = QuizQuestion {
            answer: 9,
            ..sample_question()
        };

        assert_eq!(question.correct_option(), None);
    }

    #[test]
    fn quiz_question_serializes_with_wire_field_names() {
        let json = serde_json::to_value(sample_question()).expect("question should serialize");

        for field in REQUIRED_FIELDS {
            assert!(json.get(field).is_some(), "missing {field}");
        }
        assert_eq!(json["answer"], 1);
    }
}
