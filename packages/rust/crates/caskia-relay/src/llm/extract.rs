//! Reply extraction from completion API responses.
//!
//! Providers disagree on where the reply text lives. Each strategy looks at
//! one known shape; they run in priority order and the first hit wins. When
//! none match, the whole response is returned as compact JSON so the caller
//! still sees something.

use serde_json::Value;

/// One extraction strategy: pure, returns `None` when its shape is absent.
pub type ReplyExtractor = fn(&Value) -> Option<String>;

/// Strategies in priority order, named for logging.
pub const REPLY_EXTRACTORS: &[(&str, ReplyExtractor)] = &[
    ("choices.message.content", choice_message_content),
    ("output_text", output_text),
    ("result", result_field),
];

/// Apply [`REPLY_EXTRACTORS`] in order, falling back to the serialized response.
pub fn extract_reply(response: &Value) -> String {
    for (shape, extract) in REPLY_EXTRACTORS {
        if let Some(reply) = extract(response) {
            tracing::debug!(shape, "completion reply extracted");
            return reply;
        }
    }
    tracing::debug!("no known reply shape; returning serialized response");
    response.to_string()
}

/// `choices[0].message.content` (OpenAI-compatible chat completions).
pub fn choice_message_content(response: &Value) -> Option<String> {
    response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(non_empty_text)
}

/// `output_text` (responses-style APIs).
pub fn output_text(response: &Value) -> Option<String> {
    response.get("output_text").and_then(non_empty_text)
}

/// `result` (simple wrappers).
pub fn result_field(response: &Value) -> Option<String> {
    response.get("result").and_then(non_empty_text)
}

fn non_empty_text(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}
