//! Interactive terminal front-ends for the quiz pipeline and the chat
//! assistant. Both loops take any reader/writer pair so they can be driven
//! from tests.

use std::io::{self, BufRead, Write};

use crate::{errors::AppError, models::domain::Quiz, services::chat_service::ChatService};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
}

/// Prints `prompt` and reads one trimmed line. `None` at end of input.
pub fn prompt_line<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<String>> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Resolves the quiz topic: the one given on the command line, or one typed at
/// the prompt. A blank topic is refused with a message and yields `None`.
pub fn read_topic<R: BufRead, W: Write>(
    given: Option<String>,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<String>> {
    let topic = match given {
        Some(topic) => topic,
        None => prompt_line("Enter a topic for your quiz: ", input, output)?.unwrap_or_default(),
    };

    if topic.trim().is_empty() {
        writeln!(output, "Topic cannot be empty.")?;
        return Ok(None);
    }
    Ok(Some(topic.trim().to_string()))
}

/// Turns a 1-based answer typed by the user into an option index.
pub fn parse_choice(answer: &str, option_count: usize) -> Option<usize> {
    match answer.trim().parse::<usize>() {
        Ok(n) if (1..=option_count).contains(&n) => Some(n - 1),
        _ => None,
    }
}

pub fn run_quiz<R: BufRead, W: Write>(
    quiz: &Quiz,
    input: &mut R,
    output: &mut W,
) -> io::Result<QuizScore> {
    let mut correct = 0;

    for (i, question) in quiz.questions().iter().enumerate() {
        writeln!(output, "\nQ{}: {}", i + 1, question.question)?;
        for (idx, option) in question.options.iter().enumerate() {
            writeln!(output, "{}. {}", idx + 1, option)?;
        }

        let prompt = format!("Your answer (1-{}): ", question.options.len());
        let answer = prompt_line(&prompt, input, output)?.unwrap_or_default();

        match parse_choice(&answer, question.options.len()) {
            Some(choice) if question.is_correct(choice) => {
                writeln!(output, "Correct ✅")?;
                correct += 1;
            }
            _ => writeln!(
                output,
                "Incorrect ❌ | Correct: {} | {}",
                question.correct_option().unwrap_or_default(),
                question.explanation
            )?,
        }
    }

    let score = QuizScore {
        correct,
        total: quiz.len(),
    };
    writeln!(output, "\nQuiz finished! Your score: {}/{}", score.correct, score.total)?;
    Ok(score)
}

fn is_exit_command(line: &str) -> bool {
    matches!(line.to_lowercase().as_str(), "exit" | "quit")
}

/// Chat REPL. Stops on `exit`, `quit` or end of input; a failed reply is
/// reported and the loop keeps going.
pub async fn run_chat<R: BufRead, W: Write>(
    service: &ChatService,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    writeln!(output, "Type 'exit' or 'quit' to stop.")?;

    while let Some(line) = prompt_line("You: ", input, output)? {
        if is_exit_command(&line) {
            break;
        }

        match service.ask(&line).await {
            Ok(reply) => writeln!(output, "Assistant: {}", reply)?,
            Err(AppError::ValidationError(_)) => continue,
            Err(err) => writeln!(output, "Error: {}", err)?,
        }
    }

    Ok(())
}
