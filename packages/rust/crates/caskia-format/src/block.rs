//! Structure detection: lists, paragraphs, or plain inline text.

use regex::Regex;

use crate::escape::render_bold;
use crate::normalize::{inline_numbered_items, split_run_on_lists};
use crate::patterns::{BULLETED_ITEM, LINE_BREAKS, NUMBERED_ITEM, PARAGRAPH_BREAKS};

/// Display structure detected in one reply.
///
/// Every string held here is already escaped; only [`FormattedBlock::to_html`]
/// adds tags around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedBlock {
    /// `<ol>` items, markers stripped.
    OrderedList(Vec<String>),
    /// `<ul>` items, markers stripped.
    UnorderedList(Vec<String>),
    /// Two or more `<p>` blocks; single newlines inside become `<br>`.
    Paragraphs(Vec<String>),
    /// No structure found; newlines become `<br>`.
    Inline(String),
}

impl FormattedBlock {
    /// Render as markup.
    #[must_use]
    pub fn to_html(&self) -> String {
        match self {
            Self::OrderedList(items) => wrap_list("ol", items),
            Self::UnorderedList(items) => wrap_list("ul", items),
            Self::Paragraphs(paragraphs) => {
                let inner = paragraphs
                    .iter()
                    .map(|paragraph| paragraph.replace('\n', "<br>"))
                    .collect::<Vec<_>>()
                    .join("</p><p>");
                format!("<p>{inner}</p>")
            }
            Self::Inline(text) => text.replace('\n', "<br>"),
        }
    }
}

fn wrap_list(tag: &str, items: &[String]) -> String {
    let mut rendered = format!("<{tag}>");
    for item in items {
        rendered.push_str("<li>");
        rendered.push_str(item);
        rendered.push_str("</li>");
    }
    rendered.push_str(&format!("</{tag}>"));
    rendered
}

/// Escape, bold, and detect the display structure of `text`.
///
/// Heuristics run from most to least specific: explicit multi-line lists,
/// inline numbered lists, blank-line paragraphs, then plain text.
#[must_use]
pub fn classify(text: &str) -> FormattedBlock {
    let html = split_run_on_lists(&render_bold(text));

    let lines: Vec<&str> = LINE_BREAKS
        .split(&html)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() > 1 {
        if lines.iter().all(|line| NUMBERED_ITEM.is_match(line)) {
            return FormattedBlock::OrderedList(strip_markers(&lines, &NUMBERED_ITEM));
        }
        if lines.iter().all(|line| BULLETED_ITEM.is_match(line)) {
            return FormattedBlock::UnorderedList(strip_markers(&lines, &BULLETED_ITEM));
        }
    }

    let inline_items = inline_numbered_items(&html);
    if inline_items.len() >= 2 {
        return FormattedBlock::OrderedList(inline_items);
    }

    let paragraphs: Vec<String> = PARAGRAPH_BREAKS
        .split(&html)
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(ToString::to_string)
        .collect();
    if paragraphs.len() > 1 {
        return FormattedBlock::Paragraphs(paragraphs);
    }

    FormattedBlock::Inline(html)
}

fn strip_markers(lines: &[&str], marker: &Regex) -> Vec<String> {
    lines
        .iter()
        .map(|line| marker.replace(line, "").into_owned())
        .collect()
}

/// Render raw assistant text as markup that is safe to insert into a page.
#[must_use]
pub fn format_for_display(text: &str) -> String {
    classify(text).to_html()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_lines_become_ordered_list() {
        assert_eq!(
            classify("1. A\n2. B\n3. C"),
            FormattedBlock::OrderedList(vec!["A".into(), "B".into(), "C".into()])
        );
    }

    #[test]
    fn each_bullet_marker_is_recognised() {
        assert_eq!(
            classify("- one\n* two\n• three"),
            FormattedBlock::UnorderedList(vec!["one".into(), "two".into(), "three".into()])
        );
    }

    #[test]
    fn blank_lines_between_list_items_are_ignored() {
        assert_eq!(
            classify("- A\n\n\n- B"),
            FormattedBlock::UnorderedList(vec!["A".into(), "B".into()])
        );
    }

    #[test]
    fn single_numbered_line_is_not_a_list() {
        assert_eq!(
            classify("1. Only one"),
            FormattedBlock::Inline("1. Only one".into())
        );
    }

    #[test]
    fn mixed_lines_fall_back_to_line_breaks() {
        assert_eq!(classify("1. A\nB"), FormattedBlock::Inline("1. A\nB".into()));
    }

    #[test]
    fn paragraphs_keep_inner_line_breaks() {
        let block = classify("Hi there\nfriend\n\nSecond part");
        assert_eq!(
            block,
            FormattedBlock::Paragraphs(vec!["Hi there\nfriend".into(), "Second part".into()])
        );
        assert_eq!(
            block.to_html(),
            "<p>Hi there<br>friend</p><p>Second part</p>"
        );
    }

    #[test]
    fn empty_text_renders_empty() {
        assert_eq!(format_for_display(""), "");
    }
}
