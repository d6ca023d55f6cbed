//! Fixed system prompts and per-request message building.

use crate::types::{ChatMessage, GenerateRequest, Mode};

pub const REWRITE_SYSTEM_PROMPT: &str = r#"You are a precise and helpful text rewriting assistant.

You receive:
- a user provided text
- a target tone label

Your goals:
1) Preserve the original meaning and key details.
2) Apply the requested tone clearly.
3) Improve clarity and flow.
4) Fix basic grammar.
5) Return only the rewritten text. Do not explain changes."#;

pub const SUMMARY_SYSTEM_PROMPT: &str = r#"You are a clear, structured summarization assistant.

You receive:
- a user provided text
- a requested summary length, such as "short", "medium", or "detailed"

Your goals:
1) Capture the core message and key points.
2) Match the requested length:
   - short: one or two sentences
   - medium: one short paragraph
   - detailed: two or three short paragraphs
3) Use simple language that is easy to skim.
4) Return only the summary text. No extra commentary."#;

pub fn system_prompt(mode: Mode) -> &'static str {
    match mode {
        Mode::Rewrite => REWRITE_SYSTEM_PROMPT,
        Mode::Summarize => SUMMARY_SYSTEM_PROMPT,
    }
}

/// User payload: the parameter label followed by the raw text
pub fn user_prompt(request: &GenerateRequest) -> String {
    match request {
        GenerateRequest::Rewrite { text, tone } => {
            format!("Tone: \"{}\".\n\nText:\n{}", tone, text)
        }
        GenerateRequest::Summarize { text, length } => {
            format!("Summary length: \"{}\".\n\nText:\n{}", length, text)
        }
    }
}

/// Build the ordered (system, user) pair sent for one request
pub fn build_messages(request: &GenerateRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt(request.mode())),
        ChatMessage::user(user_prompt(request)),
    ]
}
