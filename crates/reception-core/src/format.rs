//! Reply Formatting
//!
//! Turns the plain-text markup assistants tend to produce (bold spans,
//! headers, bullet and numbered lists, newlines) into HTML fragments for the
//! message bubble. This is a fixed chain of regex substitutions, not a
//! markdown parser: unbalanced or nested markup comes out literally.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const BULLET: &str = "•";
const BULLET_ENTITY: &str = "&bull;";

static BOLD_STARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"));
static BOLD_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.+?)__").expect("valid regex"));
static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,3}[ \t]+(.+?)\r?$").expect("valid regex"));
static BULLET_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[-*][ \t]+").expect("valid regex"));
static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\d+\.[ \t]+").expect("valid regex"));

/// Which substitutions to apply
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatPolicy {
    /// Bold, headers, bullet and numbered lists, line breaks
    #[default]
    Full,
    /// Line breaks and bullet glyphs only
    Minimal,
}

/// Format with the default (full) policy
pub fn format_message(text: &str) -> String {
    format_with(text, FormatPolicy::Full)
}

/// Format `text` into an HTML fragment. Never fails.
pub fn format_with(text: &str, policy: FormatPolicy) -> String {
    let mut html = escape_html(text);

    if policy == FormatPolicy::Full {
        html = BOLD_STARS.replace_all(&html, "<strong>${1}</strong>").into_owned();
        html = BOLD_UNDERSCORES.replace_all(&html, "<strong>${1}</strong>").into_owned();
        // Headers render like bold text
        html = HEADER.replace_all(&html, "<strong>${1}</strong>").into_owned();
        html = BULLET_ITEM.replace_all(&html, "• ").into_owned();
        // Ordinals are dropped
        html = NUMBERED_ITEM.replace_all(&html, "• ").into_owned();
    }

    html.replace("\r\n", "<br>")
        .replace('\n', "<br>")
        .replace(BULLET, BULLET_ENTITY)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
