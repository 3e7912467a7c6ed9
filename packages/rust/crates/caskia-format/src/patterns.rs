//! Compiled patterns shared by the formatting pipeline.
//!
//! The `regex` crate has no lookaround, so "followed by a numbered marker"
//! checks are done by matching the gap first and then testing
//! [`NUMBERED_MARKER_AHEAD`] against the remainder.

use regex::Regex;
use std::sync::LazyLock;

fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(_compile_err) => match Regex::new(r"$^") {
            Ok(fallback) => fallback,
            Err(fallback_err) => panic!("hardcoded fallback regex must compile: {fallback_err}"),
        },
    }
}

/// `**X**`, non-greedy; `X` never spans a line terminator (`\n`, `\r`, U+2028, U+2029).
pub(crate) static BOLD: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"\*\*([^\n\r\x{2028}\x{2029}]+?)\*\*"));

/// Colon plus optional whitespace in front of a numbered marker.
pub(crate) static COLON_GAP: LazyLock<Regex> = LazyLock::new(|| compile_regex(r":\s*"));

/// Sentence end plus whitespace in front of a numbered marker.
pub(crate) static SENTENCE_GAP: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"\.\s+"));

/// Numbered marker anchored at the start of the haystack (`1. `).
pub(crate) static NUMBERED_MARKER_AHEAD: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"^[0-9]+\.\s"));

/// Numbered marker anywhere (`1. `), single trailing whitespace.
pub(crate) static NUMBERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"[0-9]+\.\s"));

/// Numbered marker with all of its trailing whitespace.
pub(crate) static INLINE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"[0-9]+\.\s+"));

pub(crate) static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"^[0-9]+\.\s+"));

pub(crate) static BULLETED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"^[-*•]\s+"));

pub(crate) static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"\n+"));

pub(crate) static PARAGRAPH_BREAKS: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"\n{2,}"));
