//! Studio Common - shared core for Rewrite Studio
//!
//! Prompt templates, the chat-completion client, output normalization and
//! formatting, and the request lifecycle used by both studiod and studioctl.

pub mod config;
pub mod error;
pub mod formatter;
pub mod llm_client;
pub mod normalizer;
pub mod orchestrator;
pub mod prompts;
pub mod redact;
pub mod types;

pub use config::{ApiKey, Config, LlmConfig, ServerConfig};
pub use error::{ConfigError, LlmError, ValidationError};
pub use formatter::{format_output, wrap_text, OutputPanel, PanelState};
pub use llm_client::{CompletionClient, FakeLlmClient, HttpLlmClient};
pub use normalizer::normalize;
pub use orchestrator::{Outcome, Studio, FAILURE_MESSAGE};
pub use types::{ChatMessage, GenerateForm, GenerateRequest, Mode, Role, SummaryLength, Tone};
