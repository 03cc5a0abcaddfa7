//! Error types for the Keep CLI

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeepError {
    /// Neither the credential helper nor the environment produced a token.
    #[error(
        "No Google access token found. Please run \"gcloud auth application-default login\" or set {env_var} environment variable."
    )]
    NoToken { env_var: String },

    /// A required option is missing or malformed. Raised before any request.
    #[error("{0}")]
    Validation(String),

    /// Non-2xx response; `body` is the raw response text.
    #[error("API Error: {status} - {body}")]
    Api { status: u16, body: String },

    /// Network, DNS or connection failure.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl KeepError {
    pub fn validation(msg: impl Into<String>) -> Self {
        KeepError::Validation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, KeepError>;
