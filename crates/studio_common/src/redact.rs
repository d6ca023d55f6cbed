//! Credential redaction for diagnostics.
//!
//! Provider errors are logged and shown to the user as a detail line, so any
//! key-shaped substring is scrubbed first.

use regex::Regex;
use std::sync::LazyLock;

static REDACTION_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        // OpenAI-style secret keys (sk-..., sk-proj-...)
        (
            Regex::new(r"sk-[A-Za-z0-9_-]{16,}").unwrap(),
            "[REDACTED: API key]",
        ),
        // Bearer tokens
        (
            Regex::new(r"(?i)bearer\s+[a-zA-Z0-9._-]{16,}").unwrap(),
            "[REDACTED: bearer token]",
        ),
        // Generic API keys
        (
            Regex::new(r"(?i)(api_key|apikey|api-key)\s*[=:]\s*[a-zA-Z0-9_-]{16,}").unwrap(),
            "[REDACTED: API key]",
        ),
    ]
});

/// Redact credential patterns from text
pub fn redact(text: &str) -> String {
    let mut result = text.to_string();

    for (pattern, replacement) in REDACTION_PATTERNS.iter() {
        result = pattern.replace_all(&result, *replacement).to_string();
    }

    result
}

/// Mask a secret for display, keeping only a short prefix
pub fn mask_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(3).collect();
    if secret.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{}****", prefix)
    }
}
