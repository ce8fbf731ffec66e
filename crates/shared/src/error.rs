use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Network,
    Server,
    Parse,
    Validation,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Server => "server",
            Self::Parse => "parse",
            Self::Validation => "validation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// The request could not be sent or no response arrived.
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned status {status}: {message}")]
    Server { status: u16, message: String },
    #[error("malformed response: {0}")]
    Parse(String),
    /// Rejected locally; never reaches the network layer.
    #[error("invalid input: {0}")]
    Validation(String),
}

impl ConsoleError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network(err.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::Server { .. } => ErrorKind::Server,
            Self::Parse(_) => ErrorKind::Parse,
            Self::Validation(_) => ErrorKind::Validation,
        }
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value.to_string())
    }
}
