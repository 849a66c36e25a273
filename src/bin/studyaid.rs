//! Terminal front-end: take a quiz or chat with the local assistant.

use std::{io, process::ExitCode, sync::Arc};

use clap::{builder::RangedU64ValueParser, Parser, Subcommand};
use studyaid_server::{
    config::Config,
    services::{
        chat_service::ChatService, model_service::OpenAiCompatibleModel,
        ollama_service::OllamaModel, quiz_service::QuizService,
    },
    terminal::{read_topic, run_chat, run_quiz},
};

#[derive(Parser)]
#[command(name = "studyaid", version, about = "Study aid quizzes and chat in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a multiple-choice quiz and take it
    Quiz {
        /// Quiz topic; asked for interactively when omitted
        #[arg(short, long)]
        topic: Option<String>,

        /// Difficulty hint passed to the model
        #[arg(short, long, default_value = "auto")]
        difficulty: String,

        /// Number of questions (defaults to TERMINAL_QUESTION_COUNT)
        #[arg(short, long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        count: Option<usize>,
    },
    /// Chat with the local assistant
    Chat,
}

#[tokio::main]
async fn main() -> io::Result<ExitCode> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let cli = Cli::parse();
    let config = Config::from_env();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    match cli.command {
        Command::Quiz {
            topic,
            difficulty,
            count,
        } => {
            let Some(topic) = read_topic(topic, &mut input, &mut output)? else {
                return Ok(ExitCode::FAILURE);
            };

            let model = OpenAiCompatibleModel::from_config(&config)?;
            let service = QuizService::new(Arc::new(model));
            let count = count.unwrap_or(config.terminal_question_count);

            let quiz = match service.generate(&topic, Some(difficulty.as_str()), count).await {
                Ok(quiz) => quiz,
                Err(err) => {
                    eprintln!("Could not generate quiz: {}", err);
                    if let Some(raw) = err.raw() {
                        eprintln!("Model output:\n{}", raw);
                    }
                    return Ok(ExitCode::FAILURE);
                }
            };
            run_quiz(&quiz, &mut input, &mut output)?;
        }
        Command::Chat => {
            let service = ChatService::new(Arc::new(OllamaModel::from_config(&config)));
            run_chat(&service, &mut input, &mut output).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
