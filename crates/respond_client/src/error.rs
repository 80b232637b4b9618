use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RespondError>;

#[derive(Debug, Error)]
pub enum RespondError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The endpoint could not be reached, or the connection dropped mid-exchange.
    #[error("Connection error: {0}")]
    Connection(#[source] reqwest::Error),

    #[error("HTTP error: server returned {status}")]
    Http { status: StatusCode, body: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Decode error: '{field}' is not {expected}")]
    UnexpectedType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Missing field: response has no '{0}' key")]
    MissingField(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
