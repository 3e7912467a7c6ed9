//! Recover list structure from run-on sentences.

use regex::Regex;

use crate::patterns::{COLON_GAP, INLINE_MARKER, NUMBERED_MARKER, NUMBERED_MARKER_AHEAD, SENTENCE_GAP};

/// Break `": 1."` and `". 1."` runs onto their own lines.
///
/// The colon (and its whitespace) is replaced by a newline; a sentence-ending
/// period is kept and only its trailing whitespace becomes a newline. The
/// numbered marker itself is never consumed.
pub(crate) fn split_run_on_lists(text: &str) -> String {
    let text = replace_before_numbered_marker(text, &COLON_GAP, "\n");
    replace_before_numbered_marker(&text, &SENTENCE_GAP, ".\n")
}

fn replace_before_numbered_marker(text: &str, gap: &Regex, replacement: &str) -> String {
    let mut rebuilt = String::with_capacity(text.len());
    let mut copied_to = 0;
    for found in gap.find_iter(text) {
        if !NUMBERED_MARKER_AHEAD.is_match(&text[found.end()..]) {
            continue;
        }
        rebuilt.push_str(&text[copied_to..found.start()]);
        rebuilt.push_str(replacement);
        copied_to = found.end();
    }
    rebuilt.push_str(&text[copied_to..]);
    rebuilt
}

/// Items of an inline numbered list such as `1. a 2. b 3. c`.
///
/// Each item runs from the end of its marker up to the next `N. ` marker or
/// the end of the text, and holds at least one character. Text before the
/// first marker is dropped. Items are trimmed.
pub(crate) fn inline_numbered_items(text: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut cursor = 0;
    while let Some(marker) = INLINE_MARKER.find_at(text, cursor) {
        let Some(content_start) = item_content_start(text, marker.as_str(), marker.end()) else {
            break;
        };
        let first_char_len = text[content_start..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        let content_end = NUMBERED_MARKER
            .find_at(text, content_start + first_char_len)
            .map_or(text.len(), |next| next.start());
        items.push(text[content_start..content_end].trim().to_string());
        cursor = content_end;
        if cursor >= text.len() {
            break;
        }
    }
    items
}

/// Where an item's content begins once its marker has been matched.
///
/// A marker that reaches the end of the text only yields an item when it has
/// whitespace to spare: its last whitespace character becomes the content.
fn item_content_start(text: &str, marker: &str, marker_end: usize) -> Option<usize> {
    if marker_end < text.len() {
        return Some(marker_end);
    }
    let whitespace = marker.split_once('.').map_or("", |(_, rest)| rest);
    let mut chars = whitespace.chars().rev();
    let last = chars.next()?;
    chars.next()?;
    Some(marker_end - last.len_utf8())
}
