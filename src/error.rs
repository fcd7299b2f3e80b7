//! Error types for the dispatch pipeline.

use thiserror::Error;

/// Failure talking to the maps provider.
///
/// The gateway recovers from every variant by falling back to straight-line
/// geometry, so these never reach pipeline callers.
#[derive(Debug, Error)]
pub enum MapsError {
    #[error("maps request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("maps provider returned status {status}: {message}")]
    Status { status: String, message: String },

    #[error("malformed maps payload: {0}")]
    MalformedPayload(String),
}

/// Failure obtaining a completion from the hosted language model.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("no API key configured for the completion service")]
    MissingApiKey,

    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("completion service returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to read completion stream: {0}")]
    Io(#[from] std::io::Error),

    #[error("completion stream reported an error: {0}")]
    Stream(String),

    #[error("completion response contained no text")]
    Empty,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("no available vehicles to assign rides to")]
    NoAvailableVehicles,
}

/// Terminal failure of one comparison pass.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("optimizer output is not a valid assignment set: {0}")]
    InvalidOutput(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}
