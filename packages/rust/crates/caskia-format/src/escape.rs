//! HTML escaping and bold markers.

use crate::patterns::BOLD;

/// Escape the five HTML-significant characters.
///
/// Always runs on the raw text before any markup is introduced, so nothing the
/// model wrote can reach the document as a tag.
#[must_use]
pub fn escape_html(text: &str) -> String {
    text.chars()
        .fold(String::with_capacity(text.len()), |mut escaped, ch| {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#039;"),
                _ => escaped.push(ch),
            }
            escaped
        })
}

/// Escape `text`, then turn `**X**` into `<strong>X</strong>`.
///
/// An unmatched `**` is left as-is.
#[must_use]
pub fn render_bold(text: &str) -> String {
    let escaped = escape_html(text);
    BOLD.replace_all(&escaped, "<strong>${1}</strong>").into_owned()
}
