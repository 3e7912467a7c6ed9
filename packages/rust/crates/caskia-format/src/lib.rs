//! Safe HTML rendering for assistant replies.
//!
//! Model output arrives as loosely-structured text: `**bold**` markers,
//! numbered or bulleted lines, lists squashed into one sentence
//! (`Steps: 1. a 2. b`), blank-line paragraphs. [`format_for_display`] turns it
//! into markup that can be inserted into a page as-is:
//!
//! 1. escape `& < > " '` over the whole input,
//! 2. `**X**` → `<strong>X</strong>`,
//! 3. split run-on lists (`": 1."`, `". 1."`) onto separate lines,
//! 4. detect multi-line lists, then inline numbered lists, then paragraphs,
//! 5. otherwise convert newlines to `<br>`.
//!
//! Escaping always happens first, so no structural step can emit markup that
//! came from the input.

mod block;
mod escape;
mod normalize;
mod patterns;

pub use block::{FormattedBlock, classify, format_for_display};
pub use escape::{escape_html, render_bold};
