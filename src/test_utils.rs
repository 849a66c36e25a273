#[cfg(test)]
pub mod fixtures {
    use serde_json::{json, Value};

    /// A well-formed question object as a model would emit it.
    pub fn question_json(index: usize) -> Value {
        json!({
            "question": format!("Sample question {}?", index + 1),
            "options": ["Alpha", "Beta", "Gamma", "Delta"],
            "answer": index % 4,
            "explanation": format!("Explanation for question {}.", index + 1),
        })
    }

    /// Raw model text holding `count` well-formed questions.
    pub fn quiz_json(count: usize) -> String {
        Value::Array((0..count).map(question_json).collect()).to_string()
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_quiz_json_has_requested_length() {
        let value: serde_json::Value = serde_json::from_str(&quiz_json(3)).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_fixtures_answers_stay_in_range() {
        for i in 0..10 {
            let question = question_json(i);
            assert!(question["answer"].as_u64().unwrap() < 4);
        }
    }
}
