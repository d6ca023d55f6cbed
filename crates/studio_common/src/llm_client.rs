//! Chat-completion client.
//!
//! One blocking call per request against an OpenAI-compatible
//! `/v1/chat/completions` endpoint. A scripted fake is provided for tests.

use crate::config::{ApiKey, LlmConfig};
use crate::error::{ConfigError, LlmError};
use crate::types::ChatMessage;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;

/// Generic completion client trait
pub trait CompletionClient: Send + Sync {
    /// Send the ordered messages and return the trimmed text of the first choice
    fn complete(&self, messages: &[ChatMessage], temperature: f32) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Real client over HTTP
pub struct HttpLlmClient {
    endpoint: String,
    model: String,
    api_key: ApiKey,
    timeout_secs: u64,
    client: reqwest::blocking::Client,
}

impl HttpLlmClient {
    /// Fails with `ConfigError::MissingApiKey` when no credential is configured
    pub fn new(config: &LlmConfig) -> Result<Self, ConfigError> {
        let api_key = config.require_api_key()?.clone();

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            timeout_secs: config.timeout_secs,
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/v1/chat/completions", self.endpoint)
    }
}

impl CompletionClient for HttpLlmClient {
    fn complete(&self, messages: &[ChatMessage], temperature: f32) -> Result<String, LlmError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature,
        };

        tracing::debug!(model = %self.model, messages = messages.len(), temperature, "Calling chat completion");

        let response = self
            .client
            .post(self.url())
            .bearer_auth(self.api_key.expose())
            .json(&request_body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.timeout_secs)
                } else {
                    LlmError::Http(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response.text());
            return Err(match status.as_u16() {
                401 | 403 => LlmError::Unauthorized(status.as_u16()),
                429 => LlmError::RateLimited(body),
                code => LlmError::Status { status: code, body },
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .map_err(|e| LlmError::InvalidJson(format!("Failed to parse response: {}", e)))?;

        let first = parsed.choices.into_iter().next().ok_or(LlmError::NoChoices)?;
        let content = first
            .message
            .and_then(|m| m.content)
            .unwrap_or_default();

        Ok(content.trim().to_string())
    }
}

/// Body of a failed response; a read failure is kept as text instead of vanishing
fn error_body<E: std::fmt::Display>(body: Result<String, E>) -> String {
    body.unwrap_or_else(|e| format!("<unreadable body: {}>", e))
}

/// A call observed by `FakeLlmClient`
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// Fake completion client for testing
pub struct FakeLlmClient {
    responses: Mutex<Vec<Result<String, LlmError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeLlmClient {
    /// Create a fake client with pre-defined responses
    pub fn new(responses: Vec<Result<String, LlmError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a fake client that always returns the same text
    pub fn always(text: impl Into<String>) -> Self {
        Self::new(vec![Ok(text.into())])
    }

    /// Create a fake client that always returns an error
    pub fn always_error(error: LlmError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// Get the number of calls made
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl CompletionClient for FakeLlmClient {
    fn complete(&self, messages: &[ChatMessage], temperature: f32) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            messages: messages.to_vec(),
            temperature,
        });

        let mut responses = self.responses.lock().unwrap();
        match responses.len() {
            0 => Err(LlmError::NoChoices),
            // Keep returning the last response
            1 => responses[0].clone(),
            _ => responses.remove(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_keeps_read_failure() {
        assert_eq!(error_body::<String>(Ok("quota exceeded".to_string())), "quota exceeded");
        assert_eq!(
            error_body(Err("connection reset")),
            "<unreadable body: connection reset>"
        );
    }

    #[test]
    fn test_http_client_requires_key() {
        let config = LlmConfig::default();
        assert!(matches!(
            HttpLlmClient::new(&config),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn test_http_client_trims_endpoint() {
        let config = LlmConfig {
            endpoint: "http://localhost:8080/".to_string(),
            api_key: Some(ApiKey::new("sk-test")),
            ..Default::default()
        };
        let client = HttpLlmClient::new(&config).unwrap();
        assert_eq!(client.url(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(client.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_request_body_shape() {
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("hi")];
        let body = ChatCompletionRequest {
            model: "gpt-4o-mini",
            messages: &messages,
            temperature: 0.5,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hi"}
                ],
                "temperature": 0.5
            })
        );
    }

    #[test]
    fn test_fake_client_always() {
        let client = FakeLlmClient::always("done");
        assert_eq!(client.complete(&[], 0.75).unwrap(), "done");
        assert_eq!(client.complete(&[], 0.75).unwrap(), "done");
        assert_eq!(client.call_count(), 2);
    }

    #[test]
    fn test_fake_client_records_calls() {
        let client = FakeLlmClient::always("ok");
        let messages = vec![ChatMessage::user("hello")];
        client.complete(&messages, 0.5).unwrap();

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].messages, messages);
        assert_eq!(calls[0].temperature, 0.5);
    }

    #[test]
    fn test_fake_client_multiple_responses() {
        let client = FakeLlmClient::new(vec![
            Ok("one".to_string()),
            Err(LlmError::Timeout(60)),
            Ok("three".to_string()),
        ]);

        assert_eq!(client.complete(&[], 0.5).unwrap(), "one");
        assert_eq!(client.complete(&[], 0.5), Err(LlmError::Timeout(60)));
        assert_eq!(client.complete(&[], 0.5).unwrap(), "three");
        assert_eq!(client.call_count(), 3);
    }
}
