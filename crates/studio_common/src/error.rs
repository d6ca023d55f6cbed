//! Error types for Rewrite Studio.

use thiserror::Error;

/// Startup configuration failures. Fatal: the binaries refuse to start.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set. Create a .env file with your key or set llm.api_key in the config file.")]
    MissingApiKey,

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// User input problems, reported inline without calling the provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please add some text first.")]
    EmptyText,

    #[error("Unknown mode \"{0}\". Choose Rewrite or Summarize.")]
    UnknownMode(String),

    #[error("Unknown tone \"{0}\". Choose Friendly, Confident, Concise or Playful.")]
    UnknownTone(String),

    #[error("Unknown summary length \"{0}\". Choose Short, Medium or Detailed.")]
    UnknownLength(String),
}

/// Provider failures from the chat-completion backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Provider rejected the credential (HTTP {0})")]
    Unauthorized(u16),

    #[error("Provider rate limit reached: {0}")]
    RateLimited(String),

    #[error("Provider returned error status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid JSON response: {0}")]
    InvalidJson(String),

    #[error("Provider returned no choices")]
    NoChoices,
}

impl LlmError {
    /// Short machine-readable kind, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            LlmError::Http(_) => "transport",
            LlmError::Timeout(_) => "timeout",
            LlmError::Unauthorized(_) => "unauthorized",
            LlmError::RateLimited(_) => "rate_limited",
            LlmError::Status { .. } => "status",
            LlmError::InvalidJson(_) => "invalid_json",
            LlmError::NoChoices => "no_choices",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_message_is_user_facing() {
        assert_eq!(
            ValidationError::EmptyText.to_string(),
            "Please add some text first."
        );
    }

    #[test]
    fn test_llm_error_kind() {
        assert_eq!(LlmError::Timeout(60).kind(), "timeout");
        assert_eq!(
            LlmError::Status {
                status: 500,
                body: "boom".to_string()
            }
            .kind(),
            "status"
        );
        assert_eq!(LlmError::NoChoices.kind(), "no_choices");
    }
}
