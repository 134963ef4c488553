//! Shared error types for the services crate.

use thiserror::Error;

use exam_core::model::{DecodeError, ScopeError};
use exam_core::session::{FailureKind, SessionError};

/// Errors emitted by a `QuestionSource`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("question generation is not configured")]
    Disabled,
    #[error("question generator returned an empty response")]
    EmptyResponse,
    #[error("question generator refused the request: {0}")]
    Blocked(String),
    #[error("question generator request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl GenerationError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            GenerationError::Decode(_) => FailureKind::SchemaViolation,
            _ => FailureKind::GenerationFailure,
        }
    }

    /// Text shown to the user after returning to the setup screen.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::Disabled => {
                "No API key is configured. Set EXAM_AI_API_KEY and restart the app.".into()
            }
            GenerationError::EmptyResponse => {
                "The generator returned nothing. Please try again.".into()
            }
            GenerationError::Blocked(reason) => {
                format!("The generator declined to produce questions ({reason}). Please try again.")
            }
            GenerationError::HttpStatus(status) => {
                format!("The generator answered with HTTP {}. Please try again.", status.as_u16())
            }
            GenerationError::Http(err) if err.is_timeout() => {
                "The generator took too long to answer. Please try again.".into()
            }
            GenerationError::Http(_) => {
                "Could not reach the generator. Check your connection and try again.".into()
            }
            GenerationError::Decode(_) => {
                "The generated exam was malformed. Please try again.".into()
            }
        }
    }
}

/// Errors emitted while validating `GeminiConfigDraft`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("invalid base url `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("invalid timeout `{0}`: expected whole seconds greater than zero")]
    InvalidTimeout(String),
    #[error("max output tokens must be greater than zero")]
    InvalidMaxOutputTokens,
}

/// Errors emitted by `ExamController`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ControllerError {
    #[error(transparent)]
    Scope(#[from] ScopeError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
