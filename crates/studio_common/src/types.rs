//! Request and message types shared by the daemon and the CLI.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level operation selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Rewrite,
    Summarize,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Rewrite, Mode::Summarize];

    pub fn label(self) -> &'static str {
        match self {
            Mode::Rewrite => "Rewrite",
            Mode::Summarize => "Summarize",
        }
    }

    /// Sampling temperature sent with each completion request
    pub fn temperature(self) -> f32 {
        match self {
            Mode::Rewrite => 0.75,
            Mode::Summarize => 0.5,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rewrite" => Ok(Mode::Rewrite),
            "summarize" | "summarise" | "summary" => Ok(Mode::Summarize),
            _ => Err(ValidationError::UnknownMode(s.to_string())),
        }
    }
}

/// Target tone for a rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tone {
    Friendly,
    #[default]
    Confident,
    Concise,
    Playful,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Friendly, Tone::Confident, Tone::Concise, Tone::Playful];

    pub fn label(self) -> &'static str {
        match self {
            Tone::Friendly => "Friendly",
            Tone::Confident => "Confident",
            Tone::Concise => "Concise",
            Tone::Playful => "Playful",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|tone| tone.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownTone(s.to_string()))
    }
}

/// Requested summary length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Detailed,
}

impl SummaryLength {
    pub const ALL: [SummaryLength; 3] = [
        SummaryLength::Short,
        SummaryLength::Medium,
        SummaryLength::Detailed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SummaryLength::Short => "Short",
            SummaryLength::Medium => "Medium",
            SummaryLength::Detailed => "Detailed",
        }
    }
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SummaryLength {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SummaryLength::ALL
            .into_iter()
            .find(|length| length.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownLength(s.to_string()))
    }
}

/// A validated generate request. The variant fixes which parameter is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateRequest {
    Rewrite { text: String, tone: Tone },
    Summarize { text: String, length: SummaryLength },
}

impl GenerateRequest {
    pub fn mode(&self) -> Mode {
        match self {
            GenerateRequest::Rewrite { .. } => Mode::Rewrite,
            GenerateRequest::Summarize { .. } => Mode::Summarize,
        }
    }

    /// Raw input text, untrimmed
    pub fn text(&self) -> &str {
        match self {
            GenerateRequest::Rewrite { text, .. } | GenerateRequest::Summarize { text, .. } => text,
        }
    }

    /// Footer label, e.g. "Tone: Confident"
    pub fn parameter_label(&self) -> String {
        match self {
            GenerateRequest::Rewrite { tone, .. } => format!("Tone: {}", tone),
            GenerateRequest::Summarize { length, .. } => format!("Length: {}", length),
        }
    }
}

/// Raw user input, as submitted by the browser form or the JSON API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub length: Option<String>,
}

impl GenerateForm {
    /// Selected mode, falling back to the default when the field is missing or empty
    pub fn mode(&self) -> Result<Mode, ValidationError> {
        parse_or_default(self.mode.as_deref())
    }

    /// Validate into a request. Only the parameter belonging to the mode is read.
    pub fn validate(&self) -> Result<GenerateRequest, ValidationError> {
        let mode = self.mode()?;
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }

        let text = self.text.clone();
        Ok(match mode {
            Mode::Rewrite => GenerateRequest::Rewrite {
                text,
                tone: parse_or_default(self.tone.as_deref())?,
            },
            Mode::Summarize => GenerateRequest::Summarize {
                text,
                length: parse_or_default(self.length.as_deref())?,
            },
        })
    }
}

fn parse_or_default<T>(value: Option<&str>) -> Result<T, ValidationError>
where
    T: FromStr<Err = ValidationError> + Default,
{
    match value {
        Some(v) if !v.trim().is_empty() => v.parse(),
        _ => Ok(T::default()),
    }
}

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single role-tagged chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(mode: &str, text: &str, tone: Option<&str>, length: Option<&str>) -> GenerateForm {
        GenerateForm {
            mode: Some(mode.to_string()),
            text: text.to_string(),
            tone: tone.map(str::to_string),
            length: length.map(str::to_string),
        }
    }

    #[test]
    fn test_labels_parse_case_insensitively() {
        assert_eq!("playful".parse::<Tone>().unwrap(), Tone::Playful);
        assert_eq!(" DETAILED ".parse::<SummaryLength>().unwrap(), SummaryLength::Detailed);
        assert_eq!("Summarize".parse::<Mode>().unwrap(), Mode::Summarize);
        assert!("sarcastic".parse::<Tone>().is_err());
    }

    #[test]
    fn test_defaults_match_the_page() {
        assert_eq!(Mode::default(), Mode::Rewrite);
        assert_eq!(Tone::default(), Tone::Confident);
        assert_eq!(SummaryLength::default(), SummaryLength::Medium);
    }

    #[test]
    fn test_temperatures() {
        assert_eq!(Mode::Rewrite.temperature(), 0.75);
        assert_eq!(Mode::Summarize.temperature(), 0.5);
    }

    #[test]
    fn test_validate_rewrite_ignores_length() {
        let req = form("Rewrite", "Hello there", Some("Friendly"), Some("bogus"))
            .validate()
            .unwrap();
        assert_eq!(
            req,
            GenerateRequest::Rewrite {
                text: "Hello there".to_string(),
                tone: Tone::Friendly
            }
        );
        assert_eq!(req.parameter_label(), "Tone: Friendly");
    }

    #[test]
    fn test_validate_summarize_ignores_tone() {
        let req = form("summarize", "Long text", Some("bogus"), Some("Short"))
            .validate()
            .unwrap();
        assert_eq!(req.mode(), Mode::Summarize);
        assert_eq!(req.parameter_label(), "Length: Short");
    }

    #[test]
    fn test_validate_rejects_blank_text() {
        let err = form("Rewrite", "  \n\t ", None, None).validate().unwrap_err();
        assert_eq!(err, ValidationError::EmptyText);
    }

    #[test]
    fn test_validate_rejects_unknown_mode() {
        let err = form("Translate", "hi", None, None).validate().unwrap_err();
        assert!(matches!(err, ValidationError::UnknownMode(_)));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let req = GenerateForm {
            text: "hi".to_string(),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(
            req,
            GenerateRequest::Rewrite {
                text: "hi".to_string(),
                tone: Tone::Confident
            }
        );
    }

    #[test]
    fn test_chat_message_serializes_lowercase_role() {
        let json = serde_json::to_value(ChatMessage::system("be brief")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "system", "content": "be brief"}));
    }
}
