//! Prompt assembly.

use crate::session::Turn;

/// System turn followed by the whole stored history.
///
/// No windowing or summarisation: every stored turn is forwarded.
pub fn build_prompt(system_prompt: &str, history: Vec<Turn>) -> Vec<Turn> {
    let mut prompt = Vec::with_capacity(history.len() + 1);
    prompt.push(Turn::system(system_prompt));
    prompt.extend(history);
    prompt
}
