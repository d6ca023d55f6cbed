//! Post-processing for model output.
//!
//! Wide dashes become comma-separated clauses, whitespace runs collapse, and
//! comma spacing is repaired. Plain hyphens are left alone.

use regex::Regex;
use std::sync::LazyLock;

static WIDE_DASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*[\u{2013}\u{2014}]\s*").unwrap());
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());
static SPACE_BEFORE_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+,").unwrap());
// Absorbs every comma in the run plus trailing whitespace, so one pass is a fixed point.
static REPEATED_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",(?:\s*,)+\s*").unwrap());

/// Clean up model output for display. Never fails; empty in, empty out.
pub fn normalize(text: &str) -> String {
    let cleaned = WIDE_DASH.replace_all(text, ", ");
    let cleaned = WHITESPACE_RUN.replace_all(&cleaned, " ");
    let cleaned = SPACE_BEFORE_COMMA.replace_all(&cleaned, ",");
    let cleaned = REPEATED_COMMA.replace_all(&cleaned, ", ");
    cleaned.trim().to_string()
}
