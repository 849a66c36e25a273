use std::env;
use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

pub const DEFAULT_LLM_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_LLM_MODEL_NAME: &str = "gemini-1.5-flash";
pub const DEFAULT_WEB_QUESTION_COUNT: usize = 5;
pub const DEFAULT_TERMINAL_QUESTION_COUNT: usize = 3;

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub gemini_api_key: Option<SecretString>,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub ollama_path: String,
    pub ollama_model: String,
    pub web_question_count: usize,
    pub terminal_question_count: usize,
    pub expose_raw_model_output: bool,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            gemini_api_key: env::var("GEMINI_API_KEY").ok().map(SecretString::from),
            llm_api_base_url: env::var("LLM_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_LLM_API_BASE_URL.to_string()),
            llm_model_name: env::var("LLM_MODEL_NAME")
                .unwrap_or_else(|_| DEFAULT_LLM_MODEL_NAME.to_string()),
            ollama_path: env::var("OLLAMA_PATH").unwrap_or_else(|_| "ollama".to_string()),
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "mistral".to_string()),
            web_question_count: env::var("WEB_QUESTION_COUNT")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(DEFAULT_WEB_QUESTION_COUNT),
            terminal_question_count: env::var("TERMINAL_QUESTION_COUNT")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(DEFAULT_TERMINAL_QUESTION_COUNT),
            expose_raw_model_output: env::var("EXPOSE_RAW_MODEL_OUTPUT")
                .map(|v| raw_output_flag(&v))
                .unwrap_or(true),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|o| !o.trim().is_empty()),
        }
    }

    /// Returns the cloud model API key, failing when it was never configured.
    pub fn require_api_key(&self) -> AppResult<&SecretString> {
        match &self.gemini_api_key {
            Some(key) if !key.expose_secret().trim().is_empty() => Ok(key),
            _ => Err(AppError::ConfigError(
                "GEMINI_API_KEY not found in environment or .env".to_string(),
            )),
        }
    }

    /// Checks everything quiz generation needs before the server starts.
    pub fn validate(&self) -> AppResult<()> {
        self.require_api_key()?;

        if self.web_question_count == 0 || self.terminal_question_count == 0 {
            return Err(AppError::ConfigError(
                "question counts must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.web_server_host.clone(), self.web_server_port)
    }

    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            gemini_api_key: Some(SecretString::from("test_api_key".to_string())),
            llm_api_base_url: "http://localhost:9999/v1".to_string(),
            llm_model_name: "test-model".to_string(),
            ollama_path: "ollama".to_string(),
            ollama_model: "mistral".to_string(),
            web_question_count: DEFAULT_WEB_QUESTION_COUNT,
            terminal_question_count: DEFAULT_TERMINAL_QUESTION_COUNT,
            expose_raw_model_output: true,
            cors_allowed_origin: None,
        }
    }
}

/// Accepts the usual spellings of a boolean switch, ignoring case.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Unrecognised values keep model output private.
fn raw_output_flag(value: &str) -> bool {
    parse_flag(value).unwrap_or_else(|| {
        log::warn!(
            "EXPOSE_RAW_MODEL_OUTPUT={:?} is not a boolean, raw model output stays hidden",
            value
        );
        false
    })
}
