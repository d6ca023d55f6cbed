//! Browser page rendering.
//!
//! A single server-rendered page: the input form on the left, the output panel
//! on the right, and a footer echoing the active mode and parameter.

use html_escape::{encode_double_quoted_attribute, encode_text};
use studio_common::{GenerateForm, Mode, OutputPanel, SummaryLength, Tone};

pub const PAGE_TITLE: &str = "Rewrite Studio";

/// Text the input area starts with
pub const DEFAULT_EXAMPLE: &str = "Thank you for taking the time to consider my application. \
I am excited about the chance to contribute and learn from the team.";

const STYLE: &str = r#"
body { background: #e5e7eb; color: #111827; font-family: system-ui, -apple-system, "Segoe UI", sans-serif; }
.app-shell { max-width: 1180px; margin: 2.2rem auto 4rem auto; }
.app-title { font-size: 1.9rem; font-weight: 650; }
.app-subtitle { color: #6b7280; margin-bottom: 1.6rem; }
.columns { display: flex; gap: 2rem; align-items: flex-start; }
.column-input { flex: 1.1; }
.column-output { flex: 0.95; }
textarea { width: 100%; min-height: 220px; border-radius: 12px; border: 1px solid #e5e7eb; padding: 0.6rem; }
.panel-output { border-radius: 18px; background: #f9fafb; padding: 1.1rem 1.25rem 1.4rem 1.25rem; }
.panel-title { font-size: 0.9rem; font-weight: 600; color: #4b5563; margin-bottom: 0.5rem; }
.output-text { white-space: pre-wrap; word-wrap: break-word; line-height: 1.5; }
.output-placeholder { color: #9ca3af; }
.output-error { color: #b91c1c; }
.diagnostic { font-family: monospace; font-size: 0.78rem; color: #6b7280; margin-top: 0.8rem; }
.footer-note { font-size: 0.78rem; color: #6b7280; margin-top: 1.2rem; text-align: right; }
"#;

/// Everything the page shows
#[derive(Debug, Clone)]
pub struct PageView {
    pub mode: Mode,
    pub tone: Tone,
    pub length: SummaryLength,
    pub text: String,
    pub panel: OutputPanel,
    pub diagnostic: Option<String>,
}

impl PageView {
    /// Fresh page: defaults and the placeholder panel
    pub fn initial() -> Self {
        Self {
            mode: Mode::default(),
            tone: Tone::default(),
            length: SummaryLength::default(),
            text: DEFAULT_EXAMPLE.to_string(),
            panel: OutputPanel::placeholder(),
            diagnostic: None,
        }
    }

    /// Page after a submission, echoing what the user sent.
    /// Unparseable selections fall back to the defaults for display.
    pub fn from_form(form: &GenerateForm, panel: OutputPanel, diagnostic: Option<String>) -> Self {
        Self {
            mode: form.mode().unwrap_or_default(),
            tone: parse_or_default(form.tone.as_deref()),
            length: parse_or_default(form.length.as_deref()),
            text: form.text.clone(),
            panel,
            diagnostic,
        }
    }

    /// "Tone: Confident" or "Length: Medium", depending on mode
    pub fn parameter_label(&self) -> String {
        match self.mode {
            Mode::Rewrite => format!("Tone: {}", self.tone),
            Mode::Summarize => format!("Length: {}", self.length),
        }
    }
}

fn parse_or_default<T: std::str::FromStr + Default>(value: Option<&str>) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or_default()
}

fn options<T: Copy + PartialEq + std::fmt::Display>(all: &[T], selected: T) -> String {
    all.iter()
        .map(|item| {
            let marker = if *item == selected { " selected" } else { "" };
            format!("<option value=\"{item}\"{marker}>{item}</option>")
        })
        .collect::<Vec<_>>()
        .join("")
}

fn mode_radios(selected: Mode) -> String {
    Mode::ALL
        .iter()
        .map(|mode| {
            let checked = if *mode == selected { " checked" } else { "" };
            format!(
                "<label><input type=\"radio\" name=\"mode\" value=\"{mode}\"{checked}> {mode}</label>"
            )
        })
        .collect::<Vec<_>>()
        .join("\n          ")
}

/// Render the full HTML document
pub fn render(view: &PageView) -> String {
    let diagnostic = view
        .diagnostic
        .as_deref()
        .map(|d| format!("<div class=\"diagnostic\">{}</div>", encode_text(d)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>{style}</style>
</head>
<body>
  <div class="app-shell">
    <div class="app-title">{title}</div>
    <div class="app-subtitle">Paste text, choose a mode, and let the model handle the rewriting or summarization.</div>
    <form method="post" action="/">
      <div class="mode-select">
          {radios}
      </div>
      <div class="columns">
        <div class="column-input">
          <label for="text">Input text</label>
          <textarea id="text" name="text" placeholder="{placeholder}">{text}</textarea>
          <label for="tone">Target tone (Rewrite)</label>
          <select id="tone" name="tone">{tones}</select>
          <label for="length">Summary length (Summarize)</label>
          <select id="length" name="length">{lengths}</select>
          <button type="submit">Generate</button>
        </div>
        <div class="column-output">
{panel}
          {diagnostic}
        </div>
      </div>
    </form>
    <div class="footer-note">Mode: <strong>{mode}</strong> &bull; {parameter}</div>
  </div>
</body>
</html>
"#,
        title = PAGE_TITLE,
        style = STYLE,
        radios = mode_radios(view.mode),
        placeholder = encode_double_quoted_attribute(DEFAULT_EXAMPLE),
        text = encode_text(&view.text),
        tones = options(&Tone::ALL, view.tone),
        lengths = options(&SummaryLength::ALL, view.length),
        panel = view.panel.to_html(),
        diagnostic = diagnostic,
        mode = view.mode,
        parameter = view.parameter_label(),
    )
}
