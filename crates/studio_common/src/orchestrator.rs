//! Request lifecycle: validate, call the provider, clean up the result.
//!
//! Idle -> Validating -> Calling -> Succeeded | Failed -> Idle. Each call to
//! `Studio::generate` is one full pass; nothing is kept between passes.

use crate::error::{LlmError, ValidationError};
use crate::formatter::{format_output, OutputPanel};
use crate::llm_client::CompletionClient;
use crate::normalizer::normalize;
use crate::prompts::build_messages;
use crate::redact::redact;
use crate::types::{GenerateForm, GenerateRequest};
use std::sync::Arc;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

/// Generic message shown for any provider failure
pub const FAILURE_MESSAGE: &str =
    "Something went wrong while calling the language model. Check your API key and try again.";

/// Result of one generate action
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Input rejected before any remote call
    Rejected { error: ValidationError },
    Succeeded { request: GenerateRequest, text: String },
    /// Provider failure. `diagnostic` is redacted and safe to show.
    Failed {
        request: GenerateRequest,
        diagnostic: String,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded { .. })
    }

    /// Cleaned text, on success
    pub fn text(&self) -> Option<&str> {
        match self {
            Outcome::Succeeded { text, .. } => Some(text),
            _ => None,
        }
    }

    /// User-facing message for the non-success states
    pub fn message(&self) -> Option<String> {
        match self {
            Outcome::Rejected { error } => Some(error.to_string()),
            Outcome::Failed { .. } => Some(FAILURE_MESSAGE.to_string()),
            Outcome::Succeeded { .. } => None,
        }
    }

    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Outcome::Failed { diagnostic, .. } => Some(diagnostic),
            _ => None,
        }
    }

    pub fn request(&self) -> Option<&GenerateRequest> {
        match self {
            Outcome::Succeeded { request, .. } | Outcome::Failed { request, .. } => Some(request),
            Outcome::Rejected { .. } => None,
        }
    }

    /// Output panel for this outcome
    pub fn panel(&self) -> OutputPanel {
        match self {
            Outcome::Succeeded { text, .. } => format_output(Some(text)),
            Outcome::Rejected { error } => OutputPanel::error(&error.to_string()),
            Outcome::Failed { .. } => OutputPanel::error(FAILURE_MESSAGE),
        }
    }
}

/// The request orchestrator. Cheap to clone; holds only the client handle.
#[derive(Clone)]
pub struct Studio {
    client: Arc<dyn CompletionClient>,
}

impl Studio {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Run the full lifecycle for raw user input
    pub fn generate(&self, form: &GenerateForm) -> Outcome {
        self.generate_with_id(form, Uuid::new_v4())
    }

    /// Same as `generate`, with a caller-chosen request id for log correlation
    pub fn generate_with_id(&self, form: &GenerateForm, request_id: Uuid) -> Outcome {
        let span = info_span!("generate", %request_id);
        let _guard = span.enter();

        debug!("Validating input");
        let request = match form.validate() {
            Ok(request) => request,
            Err(error) => {
                info!(%error, "Rejected input");
                return Outcome::Rejected { error };
            }
        };

        match self.run(&request) {
            Ok(text) => {
                info!(mode = %request.mode(), chars = text.chars().count(), "Generation succeeded");
                Outcome::Succeeded { request, text }
            }
            Err(e) => {
                let diagnostic = redact(&e.to_string());
                warn!(mode = %request.mode(), kind = e.kind(), %diagnostic, "Generation failed");
                Outcome::Failed {
                    request,
                    diagnostic,
                }
            }
        }
    }

    /// Calling step for an already validated request: returns normalized text
    pub fn run(&self, request: &GenerateRequest) -> Result<String, LlmError> {
        let mode = request.mode();
        let messages = build_messages(request);

        info!(%mode, input_chars = request.text().chars().count(), "Calling provider");
        let raw = self.client.complete(&messages, mode.temperature())?;
        debug!(raw_chars = raw.chars().count(), "Provider returned");

        Ok(normalize(&raw))
    }
}
