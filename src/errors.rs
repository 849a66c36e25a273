use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Failure of an external model collaborator (cloud API or local process).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Model request failed: {0}")]
    Request(String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Model process failed: {0}")]
    Process(String),
}

/// Every way the quiz pipeline can fail. Variants produced after the model
/// answered carry the raw model text for diagnostics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Model invocation failed: {0}")]
    ModelInvocation(String),

    #[error("Could not parse model output as JSON")]
    UnparsableOutput { raw: Option<String> },

    #[error("Model returned unexpected structure")]
    UnexpectedStructure {
        expected: usize,
        found: Option<usize>,
        raw: Option<String>,
    },

    #[error("Question {index} missing fields")]
    MissingFields {
        index: usize,
        missing: Vec<String>,
        raw: Option<String>,
    },

    #[error("Question {index} must have 4 options: {reason}")]
    InvalidOptions {
        index: usize,
        reason: String,
        raw: Option<String>,
    },

    #[error("Question {index} has an invalid '{field}' field")]
    InvalidField {
        index: usize,
        field: String,
        raw: Option<String>,
    },
}

impl QuizError {
    pub fn code(&self) -> &'static str {
        match self {
            QuizError::InvalidRequest(_) => "INVALID_REQUEST",
            QuizError::ModelInvocation(_) => "MODEL_INVOCATION_ERROR",
            QuizError::UnparsableOutput { .. } => "UNPARSABLE_OUTPUT",
            QuizError::UnexpectedStructure { .. } => "UNEXPECTED_STRUCTURE",
            QuizError::MissingFields { .. } => "MISSING_FIELDS",
            QuizError::InvalidOptions { .. } => "INVALID_OPTIONS",
            QuizError::InvalidField { .. } => "INVALID_FIELD",
        }
    }

    pub fn raw(&self) -> Option<&str> {
        match self {
            QuizError::InvalidRequest(_) | QuizError::ModelInvocation(_) => None,
            QuizError::UnparsableOutput { raw }
            | QuizError::UnexpectedStructure { raw, .. }
            | QuizError::MissingFields { raw, .. }
            | QuizError::InvalidOptions { raw, .. }
            | QuizError::InvalidField { raw, .. } => raw.as_deref(),
        }
    }

    /// Drops the raw model text, for responses that must not echo it.
    pub fn without_raw(mut self) -> Self {
        match &mut self {
            QuizError::InvalidRequest(_) | QuizError::ModelInvocation(_) => {}
            QuizError::UnparsableOutput { raw }
            | QuizError::UnexpectedStructure { raw, .. }
            | QuizError::MissingFields { raw, .. }
            | QuizError::InvalidOptions { raw, .. }
            | QuizError::InvalidField { raw, .. } => *raw = None,
        }
        self
    }
}

impl From<ModelError> for QuizError {
    fn from(err: ModelError) -> Self {
        QuizError::ModelInvocation(err.to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    ModelError(#[from] ModelError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Quiz(#[from] QuizError),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::ModelError(_) => "MODEL_ERROR",
            AppError::ConfigError(_) => "CONFIG_ERROR",
            AppError::Quiz(err) => err.code(),
        }
    }
}

/// Failure envelope shared by every JSON endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Quiz(QuizError::InvalidRequest(_)) => StatusCode::BAD_REQUEST,
            AppError::ModelError(_) => StatusCode::BAD_GATEWAY,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Quiz(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let raw = match self {
            AppError::Quiz(err) => err.raw().map(str::to_string),
            _ => None,
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            ok: false,
            error: self.to_string(),
            code: self.error_code(),
            raw,
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<AppError> for std::io::Error {
    fn from(err: AppError) -> Self {
        std::io::Error::other(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
