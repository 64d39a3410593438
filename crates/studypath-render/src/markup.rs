//! Inline markup used in authored content.

use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold regex"));
static CODE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").expect("valid code block regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// Convert authored text to markup.
///
/// `\n\n` becomes `<br><br>`, `\n` becomes `<br>`, `**x**` becomes
/// `<strong>x</strong>` and a triple-backtick block becomes
/// `<pre><code>…</code></pre>`. Authored HTML passes through untouched.
pub fn format_text(text: &str) -> String {
    let mut html = text.replace("\n\n", "<br><br>").replace('\n', "<br>");
    html = BOLD.replace_all(&html, "<strong>$1</strong>").into_owned();
    if html.contains("```") {
        html = CODE_BLOCK
            .replace_all(&html, "<pre><code>$1</code></pre>")
            .into_owned();
    }
    html
}

/// Escape a string for safe HTML insertion.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Reduce markup to plain text for terminals: line breaks become newlines,
/// other tags are dropped and the basic entities are decoded.
pub fn strip_tags(html: &str) -> String {
    let text = html.replace("<br>", "\n").replace("<br/>", "\n");
    let text = TAG.replace_all(&text, "");
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}
