//! Output panel formatting: wrap, escape, and pick the display state.

use serde::{Deserialize, Serialize};

/// Column width used when wrapping results
pub const WRAP_WIDTH: usize = 90;

pub const PLACEHOLDER_TEXT: &str = "Your result will appear here after you click Generate.";

/// Display state of the output region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelState {
    Placeholder,
    Filled,
    Error,
}

impl PanelState {
    fn css_class(self) -> &'static str {
        match self {
            PanelState::Placeholder => "panel-output",
            PanelState::Filled => "panel-output panel-output-filled",
            PanelState::Error => "panel-output panel-output-error",
        }
    }
}

/// Formatted output panel. `body` is already escaped and safe to embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPanel {
    pub state: PanelState,
    pub body: String,
}

impl OutputPanel {
    pub fn placeholder() -> Self {
        Self {
            state: PanelState::Placeholder,
            body: PLACEHOLDER_TEXT.to_string(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            state: PanelState::Error,
            body: escape(message.trim()),
        }
    }

    pub fn is_filled(&self) -> bool {
        self.state == PanelState::Filled
    }

    /// Render the panel as an HTML fragment
    pub fn to_html(&self) -> String {
        let inner = match self.state {
            PanelState::Placeholder => {
                format!("<div class=\"output-placeholder\"><em>{}</em></div>", self.body)
            }
            PanelState::Filled => format!("<div class=\"output-text\">{}</div>", self.body),
            PanelState::Error => format!("<div class=\"output-error\">{}</div>", self.body),
        };

        format!(
            "<div class=\"{}\">\n  <div class=\"panel-title\">Output</div>\n  <div class=\"panel-body\">\n    {}\n  </div>\n</div>",
            self.state.css_class(),
            inner
        )
    }
}

/// Format an optional result. Blank or missing content gives the placeholder.
pub fn format_output(content: Option<&str>) -> OutputPanel {
    match content.map(str::trim) {
        Some(text) if !text.is_empty() => OutputPanel {
            state: PanelState::Filled,
            body: escape(&wrap_text(text)),
        },
        _ => OutputPanel::placeholder(),
    }
}

/// Wrap to `WRAP_WIDTH` columns. Every whitespace character, newlines included,
/// is treated as a plain space first, so the result is a single reflowed paragraph.
pub fn wrap_text(text: &str) -> String {
    let flattened: String = text
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();

    let options = textwrap::Options::new(WRAP_WIDTH).break_words(true);
    textwrap::fill(&flattened, options)
}

fn escape(text: &str) -> String {
    html_escape::encode_safe(text).into_owned()
}
