//! Turns free-form model text into a validated [`Quiz`].
//!
//! Extraction happens in two stages: the whole text is parsed as JSON, and if
//! that fails the text is scanned for balanced `[ ... ]` spans, preferring the
//! first one that parses as a list of objects. Brackets inside JSON strings are
//! ignored while matching, so nested arrays and bracketed prose cannot stretch
//! a match past its real end.

use serde_json::{Map, Value};

use crate::{
    errors::QuizError,
    models::domain::{
        quiz_question::{OPTION_COUNT, REQUIRED_FIELDS},
        Quiz, QuizQuestion,
    },
};

/// Parses and validates raw model output. Every error after extraction
/// carries `raw` so the caller can log what the model actually said.
pub fn parse_quiz(raw: &str, expected_count: usize) -> Result<Quiz, QuizError> {
    let value = extract_json(raw).ok_or_else(|| QuizError::UnparsableOutput {
        raw: Some(raw.to_string()),
    })?;

    validate_quiz(&value, expected_count).map_err(|err| attach_raw(err, raw))
}

pub fn extract_json(raw: &str) -> Option<Value> {
    serde_json::from_str::<Value>(raw.trim())
        .ok()
        .or_else(|| first_parsable_array(raw))
}

/// Tries balanced spans in order of their opening bracket. The first array of
/// objects wins; otherwise the first span that parsed at all is returned so
/// the validator can report its shape. Spans nested inside one that parsed
/// belong to it and are not tried again.
fn first_parsable_array(text: &str) -> Option<Value> {
    let mut fallback = None;
    let mut resume = 0;

    for (start, end) in bracket_spans(text) {
        if start < resume {
            continue;
        }
        match serde_json::from_str::<Value>(&text[start..=end]) {
            Ok(value) if is_object_list(&value) => return Some(value),
            Ok(value) => {
                fallback.get_or_insert(value);
                resume = end + 1;
            }
            Err(_) => {}
        }
    }

    fallback
}

fn is_object_list(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| !items.is_empty() && items.iter().all(Value::is_object))
}

/// Byte offsets of every balanced `[ ... ]` pair, ordered by the opening
/// bracket. One pass with a stack of open brackets. Quotes only start a string
/// inside brackets, so quoted prose around the array cannot hide one.
fn bracket_spans(text: &str) -> Vec<(usize, usize)> {
    let mut open = Vec::new();
    let mut spans = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' if !open.is_empty() => in_string = true,
            '[' => open.push(i),
            ']' => {
                if let Some(start) = open.pop() {
                    spans.push((start, i));
                }
            }
            _ => {}
        }
    }

    spans.sort_unstable();
    spans
}

pub fn validate_quiz(value: &Value, expected_count: usize) -> Result<Quiz, QuizError> {
    let items = match value.as_array() {
        Some(items) if items.len() == expected_count => items,
        other => {
            return Err(QuizError::UnexpectedStructure {
                expected: expected_count,
                found: other.map(Vec::len),
                raw: None,
            })
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| validate_question(index, item))
        .collect::<Result<Vec<_>, _>>()
        .map(Quiz::new)
}

fn validate_question(index: usize, item: &Value) -> Result<QuizQuestion, QuizError> {
    let empty = Map::new();
    let object = item.as_object().unwrap_or(&empty);

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !object.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(QuizError::MissingFields {
            index,
            missing,
            raw: None,
        });
    }

    let options = validate_options(index, &object["options"])?;
    let answer = validate_answer(index, &object["answer"], options.len())?;

    Ok(QuizQuestion {
        question: string_field(index, object, "question")?,
        options,
        answer,
        explanation: string_field(index, object, "explanation")?,
    })
}

fn validate_options(index: usize, value: &Value) -> Result<Vec<String>, QuizError> {
    let invalid = |reason: String| QuizError::InvalidOptions {
        index,
        reason,
        raw: None,
    };

    let options = value
        .as_array()
        .ok_or_else(|| invalid("options is not an array".to_string()))?;

    if options.len() < OPTION_COUNT {
        return Err(invalid(format!("found {}", options.len())));
    }

    options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            option
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(format!("option {} is not a string", i)))
        })
        .collect()
}

// An answer that does not point at an option makes the question unusable,
// so it is reported with the options.
fn validate_answer(index: usize, value: &Value, option_count: usize) -> Result<usize, QuizError> {
    let answer = value.as_u64().ok_or_else(|| QuizError::InvalidOptions {
        index,
        reason: "answer is not a non-negative integer".to_string(),
        raw: None,
    })?;

    match usize::try_from(answer) {
        Ok(answer) if answer < option_count => Ok(answer),
        _ => Err(QuizError::InvalidOptions {
            index,
            reason: format!("answer {} is outside 0..{}", answer, option_count),
            raw: None,
        }),
    }
}

fn string_field(
    index: usize,
    object: &Map<String, Value>,
    field: &str,
) -> Result<String, QuizError> {
    object[field]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| QuizError::InvalidField {
            index,
            field: field.to_string(),
            raw: None,
        })
}

fn attach_raw(err: QuizError, text: &str) -> QuizError {
    let raw = Some(text.to_string());
    match err {
        QuizError::UnexpectedStructure {
            expected, found, ..
        } => QuizError::UnexpectedStructure {
            expected,
            found,
            raw,
        },
        QuizError::MissingFields { index, missing, .. } => QuizError::MissingFields {
            index,
            missing,
            raw,
        },
        QuizError::InvalidOptions { index, reason, .. } => QuizError::InvalidOptions {
            index,
            reason,
            raw,
        },
        QuizError::InvalidField { index, field, .. } => QuizError::InvalidField {
            index,
            field,
            raw,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{question_json, quiz_json};
    use serde_json::json;

    #[test]
    fn parses_clean_json_array() {
        let raw = quiz_json(5);

        let quiz = parse_quiz(&raw, 5).unwrap();
        assert_eq!(quiz.len(), 5);
        assert!(quiz.questions().iter().all(|q| q.options.len() >= 4));
    }

    #[test]
    fn extracts_array_embedded_in_prose() {
        let raw = format!("Sure! {} Hope that helps", quiz_json(5));

        let quiz = parse_quiz(&raw, 5).unwrap();
        assert_eq!(quiz.len(), 5);
    }

    #[test]
    fn extracts_array_from_markdown_fence() {
        let raw = format!("```json\n{}\n```", quiz_json(3));

        assert_eq!(parse_quiz(&raw, 3).unwrap().len(), 3);
    }

    #[test]
    fn skips_bracketed_prose_before_the_array() {
        let raw = format!("[Note] Here is your quiz:\n{}\n[end]", quiz_json(3));

        assert_eq!(parse_quiz(&raw, 3).unwrap().len(), 3);
    }

    #[test]
    fn brackets_inside_strings_do_not_end_the_match() {
        let mut question = question_json(0);
        question["question"] = json!("Which index is ] in \"a]b\"?");
        let array = Value::Array(vec![question]);
        let raw = format!("Here you go: {} done", array);

        let quiz = parse_quiz(&raw, 1).unwrap();
        assert_eq!(quiz.questions()[0].question, "Which index is ] in \"a]b\"?");
    }

    #[test]
    fn gibberish_is_unparsable_and_keeps_raw_text() {
        let raw = "I'm sorry, I can't help with quizzes today.";

        let err = parse_quiz(raw, 5).unwrap_err();
        assert_eq!(
            err,
            QuizError::UnparsableOutput {
                raw: Some(raw.to_string())
            }
        );
    }

    #[test]
    fn unbalanced_array_is_unparsable() {
        let err = parse_quiz("Here: [{\"question\": \"x\"", 5).unwrap_err();
        assert!(matches!(err, QuizError::UnparsableOutput { .. }));
    }

    #[test]
    fn wrong_length_is_unexpected_structure() {
        let raw = quiz_json(4);

        let err = parse_quiz(&raw, 5).unwrap_err();
        match err {
            QuizError::UnexpectedStructure {
                expected,
                found,
                raw: Some(text),
            } => {
                assert_eq!(expected, 5);
                assert_eq!(found, Some(4));
                assert_eq!(text, raw);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn json_object_is_unexpected_structure() {
        let raw = json!({ "questions": [] }).to_string();

        let err = parse_quiz(&raw, 5).unwrap_err();
        assert!(matches!(
            err,
            QuizError::UnexpectedStructure { found: None, .. }
        ));
    }

    #[test]
    fn missing_explanation_names_the_index() {
        let mut questions: Vec<Value> = (0..5).map(question_json).collect();
        questions[3].as_object_mut().unwrap().remove("explanation");
        let raw = Value::Array(questions).to_string();

        let err = parse_quiz(&raw, 5).unwrap_err();
        match err {
            QuizError::MissingFields { index, missing, raw: Some(_) } => {
                assert_eq!(index, 3);
                assert_eq!(missing, vec!["explanation".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_object_element_is_missing_every_field() {
        let raw = json!(["just a string"]).to_string();

        let err = parse_quiz(&raw, 1).unwrap_err();
        assert!(matches!(
            err,
            QuizError::MissingFields { index: 0, ref missing, .. } if missing.len() == 4
        ));
    }

    #[test]
    fn three_options_is_invalid_options() {
        let mut questions: Vec<Value> = (0..3).map(question_json).collect();
        questions[1]["options"] = json!(["a", "b", "c"]);
        let raw = Value::Array(questions).to_string();

        let err = parse_quiz(&raw, 3).unwrap_err();
        assert!(matches!(err, QuizError::InvalidOptions { index: 1, .. }));
        assert_eq!(err.to_string(), "Question 1 must have 4 options: found 3");
    }

    #[test]
    fn extra_options_are_tolerated() {
        let mut question = question_json(0);
        question["options"] = json!(["a", "b", "c", "d", "e"]);
        let raw = Value::Array(vec![question]).to_string();

        let quiz = parse_quiz(&raw, 1).unwrap();
        assert_eq!(quiz.questions()[0].options.len(), 5);
    }

    #[test]
    fn non_string_option_is_invalid_options() {
        let mut question = question_json(0);
        question["options"] = json!(["a", 2, "c", "d"]);
        let raw = Value::Array(vec![question]).to_string();

        let err = parse_quiz(&raw, 1).unwrap_err();
        assert!(matches!(err, QuizError::InvalidOptions { index: 0, .. }));
    }

    #[test]
    fn out_of_range_answer_is_invalid_options() {
        let mut question = question_json(0);
        question["answer"] = json!(4);
        let raw = Value::Array(vec![question]).to_string();

        let err = parse_quiz(&raw, 1).unwrap_err();
        match err {
            QuizError::InvalidOptions { index, reason, .. } => {
                assert_eq!(index, 0);
                assert_eq!(reason, "answer 4 is outside 0..4");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn negative_or_textual_answer_is_invalid_options() {
        for answer in [json!(-1), json!("2"), json!(1.5)] {
            let mut question = question_json(0);
            question["answer"] = answer;
            let raw = Value::Array(vec![question]).to_string();

            let err = parse_quiz(&raw, 1).unwrap_err();
            assert!(matches!(err, QuizError::InvalidOptions { index: 0, .. }));
        }
    }

    #[test]
    fn non_string_explanation_is_invalid_field() {
        let mut question = question_json(0);
        question["explanation"] = Value::Null;
        let raw = Value::Array(vec![question]).to_string();

        let err = parse_quiz(&raw, 1).unwrap_err();
        assert_eq!(
            err,
            QuizError::InvalidField {
                index: 0,
                field: "explanation".to_string(),
                raw: Some(raw.clone()),
            }
        );
    }

    #[test]
    fn validation_is_deterministic() {
        let raw = format!("Sure! {}", quiz_json(4));

        assert_eq!(parse_quiz(&raw, 5), parse_quiz(&raw, 5));
        let ok = quiz_json(5);
        assert_eq!(parse_quiz(&ok, 5), parse_quiz(&ok, 5));
    }

    #[test]
    fn bracket_spans_handle_nesting_and_escapes() {
        assert_eq!(bracket_spans("[]"), vec![(0, 1)]);
        assert_eq!(bracket_spans("[[1], [2]] tail"), vec![(0, 9), (1, 3), (6, 8)]);
        assert_eq!(bracket_spans(r#"["\"]"] x"#), vec![(0, 6)]);
        assert_eq!(bracket_spans("[[1]"), vec![(1, 3)]);
        assert_eq!(bracket_spans("] stray ["), vec![]);
    }

    #[test]
    fn citation_before_the_quiz_is_skipped() {
        let raw = format!("Per source [1], here it is: {}", quiz_json(5));

        assert_eq!(parse_quiz(&raw, 5).unwrap().len(), 5);
    }

    #[test]
    fn lone_scalar_array_is_reported_as_structure() {
        let err = parse_quiz("The answer is [1, 2].", 5).unwrap_err();
        assert!(matches!(
            err,
            QuizError::UnexpectedStructure { found: Some(2), .. }
        ));
    }

    #[test]
    fn quiz_inside_an_unclosed_bracket_is_found() {
        let raw = format!("[draft {}", quiz_json(2));

        assert_eq!(parse_quiz(&raw, 2).unwrap().len(), 2);
    }

    #[test]
    fn pathological_bracket_runs_finish_quickly() {
        let started = std::time::Instant::now();

        let unclosed = "[".repeat(40_000);
        assert!(matches!(
            parse_quiz(&unclosed, 5),
            Err(QuizError::UnparsableOutput { .. })
        ));

        let nested = format!("{}x{}", "[".repeat(20_000), "]".repeat(20_000));
        assert!(matches!(
            parse_quiz(&nested, 5),
            Err(QuizError::UnparsableOutput { .. })
        ));

        assert!(started.elapsed() < std::time::Duration::from_secs(2));
    }
}
