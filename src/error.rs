use serde::Serialize;
use thiserror::Error;

/// Fallback text for failures that carry no usable message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Error)]
pub enum LogoGenError {
    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    /// The provider answered with a non-success status. `body` is its raw
    /// response text, forwarded as-is.
    #[error("{body}")]
    Upstream { status: u16, body: String },

    #[error("{}", .message.as_deref().unwrap_or(UNKNOWN_ERROR))]
    Transport { message: Option<String> },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl LogoGenError {
    pub fn transport(message: impl Into<String>) -> Self {
        LogoGenError::Transport {
            message: Some(message.into()),
        }
    }

    /// HTTP status the relay answers with for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            LogoGenError::Validation(_) => 400,
            LogoGenError::Upstream { status, .. } => *status,
            LogoGenError::Config(_)
            | LogoGenError::Transport { .. }
            | LogoGenError::Serialization(_)
            | LogoGenError::Persistence(_) => 500,
        }
    }
}

impl From<reqwest::Error> for LogoGenError {
    fn from(err: reqwest::Error) -> Self {
        LogoGenError::transport(err.to_string())
    }
}

impl From<serde_json::Error> for LogoGenError {
    fn from(err: serde_json::Error) -> Self {
        LogoGenError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LogoGenError>;

/// A failure narrowed to what the caller gets to see: a status and a
/// plain-text message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub status: u16,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(status: u16, message: Option<&str>) -> Self {
        let message = match message.map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => UNKNOWN_ERROR.to_string(),
        };
        Self { status, message }
    }

    /// Narrow a caught panic payload. Only `&str` and `String` payloads
    /// carry text; anything else falls back to [`UNKNOWN_ERROR`].
    pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str));
        Self::new(500, message)
    }
}

impl From<&LogoGenError> for ErrorEnvelope {
    fn from(err: &LogoGenError) -> Self {
        let status = err.status_code();
        match err {
            // Upstream bodies go out verbatim, even when blank.
            LogoGenError::Upstream { body, .. } => Self {
                status,
                message: body.clone(),
            },
            LogoGenError::Transport { message } => Self::new(status, message.as_deref()),
            other => Self::new(status, Some(&other.to_string())),
        }
    }
}
